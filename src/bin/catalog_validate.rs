//! CI gate for catalog files.
//!
//! Takes exactly one path argument, prints every field-level issue to stderr,
//! and exits non-zero when the catalog fails validation so the check can run
//! on every change to the data file. On success it prints a one-line summary
//! and exits zero.

use anyhow::{Context, Result};
use modcatalog::validate_catalog_value;
use serde_json::Value;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let path = match parse_args() {
        Some(path) => path,
        None => {
            eprintln!("usage: catalog-validate <catalog.json>");
            return ExitCode::from(2);
        }
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args() -> Option<PathBuf> {
    let mut args = env::args_os().skip(1);
    let path = args.next()?;
    if args.next().is_some() {
        return None;
    }
    Some(PathBuf::from(path))
}

fn run(path: &Path) -> Result<()> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;

    match validate_catalog_value(&value) {
        Ok(catalog) => {
            let builds: usize = catalog.versions.values().map(Vec::len).sum();
            println!(
                "{}: OK ({} version groups, {} builds)",
                path.display(),
                catalog.versions.len(),
                builds
            );
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                eprintln!("{issue}");
            }
            anyhow::bail!(
                "{} failed validation with {} error(s)",
                path.display(),
                issues.len()
            )
        }
    }
}
