//! Command-line build finder over a catalog.
//!
//! Stands in for the interactive views: loads a catalog from a base URL or a
//! local file, applies the guided criteria plus free-text search and sort,
//! and prints one line per matching build. A failed load prints the degraded
//! banner instead of crashing, matching the loader contract.

use anyhow::{Result, bail};
use modcatalog::{
    BuildFilter, EnrichedBuild, LoadOutcome, McVersion, ModLoader, SortDirection, SortKey,
    fetch_catalog, load_catalog_outcome, search_builds, sort_builds,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err:#}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let outcome = match &cli.source {
        Source::BaseUrl(base) => fetch_catalog(base),
        Source::File(path) => load_catalog_outcome(path),
    };

    match render(&cli, &outcome) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

const USAGE: &str = "usage: catalog-find (--base-url URL | --file PATH) \
[--mc-version V] [--loader fabric|forge|neoforge] [--extension NAME]... \
[--search TEXT] [--sort published|mc-version|mod-version] [--desc] [--urls]";

enum Source {
    BaseUrl(String),
    File(PathBuf),
}

struct Cli {
    source: Source,
    filter: BuildFilter,
    search: Option<String>,
    sort: Option<SortKey>,
    direction: SortDirection,
    show_urls: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut source = None;
        let mut filter = BuildFilter::default();
        let mut search = None;
        let mut sort = None;
        let mut direction = SortDirection::Ascending;
        let mut show_urls = false;

        let mut args = env::args().skip(1);
        while let Some(flag) = args.next() {
            match flag.as_str() {
                "--base-url" => source = Some(Source::BaseUrl(expect_value(&flag, &mut args)?)),
                "--file" => {
                    source = Some(Source::File(PathBuf::from(expect_value(&flag, &mut args)?)));
                }
                "--mc-version" => {
                    filter.mc_version = Some(McVersion(expect_value(&flag, &mut args)?));
                }
                "--loader" => filter.loader = Some(parse_loader(&expect_value(&flag, &mut args)?)?),
                "--extension" => filter.extensions.push(expect_value(&flag, &mut args)?),
                "--search" => search = Some(expect_value(&flag, &mut args)?),
                "--sort" => sort = Some(parse_sort_key(&expect_value(&flag, &mut args)?)?),
                "--desc" => direction = SortDirection::Descending,
                "--urls" => show_urls = true,
                "--help" | "-h" => {
                    println!("{USAGE}");
                    std::process::exit(0);
                }
                other => bail!("unknown flag '{other}'"),
            }
        }

        let Some(source) = source else {
            bail!("one of --base-url or --file is required");
        };

        Ok(Self {
            source,
            filter,
            search,
            sort,
            direction,
            show_urls,
        })
    }
}

fn expect_value(flag: &str, args: &mut impl Iterator<Item = String>) -> Result<String> {
    match args.next() {
        Some(value) => Ok(value),
        None => bail!("{flag} requires a value"),
    }
}

fn parse_loader(value: &str) -> Result<ModLoader> {
    match value {
        "fabric" => Ok(ModLoader::Fabric),
        "forge" => Ok(ModLoader::Forge),
        "neoforge" => Ok(ModLoader::Neoforge),
        other => bail!("unknown loader '{other}' (expected fabric, forge, or neoforge)"),
    }
}

fn parse_sort_key(value: &str) -> Result<SortKey> {
    match value {
        "published" => Ok(SortKey::PublishedAt),
        "mc-version" => Ok(SortKey::McVersion),
        "mod-version" => Ok(SortKey::ModVersion),
        other => bail!("unknown sort key '{other}' (expected published, mc-version, or mod-version)"),
    }
}

fn render(cli: &Cli, outcome: &LoadOutcome) -> Result<()> {
    if let Some(error) = &outcome.error {
        bail!("couldn't load catalog: {error}");
    }
    if let Some(catalog) = &outcome.catalog {
        println!("catalog updated: {}", catalog.updated_at);
    }

    let mut matched: Vec<EnrichedBuild> = outcome
        .builds
        .iter()
        .filter(|entry| cli.filter.matches(entry))
        .cloned()
        .collect();
    if let Some(query) = &cli.search {
        matched = search_builds(&matched, query).into_iter().cloned().collect();
    }
    if let Some(key) = cli.sort {
        matched = sort_builds(&matched, key, cli.direction);
    }

    if matched.is_empty() {
        println!("no builds match");
        return Ok(());
    }

    for entry in &matched {
        print_entry(entry, cli.show_urls);
    }
    Ok(())
}

fn print_entry(entry: &EnrichedBuild, show_urls: bool) {
    let build = &entry.build;
    let loaders = build
        .mod_loader
        .iter()
        .map(|l| l.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let status = build
        .status
        .map(|s| format!(" [{}]", s.as_str()))
        .unwrap_or_default();
    println!(
        "{}  mc {}  v{}  {}  {}  ext: {}{}",
        build.id.0,
        entry.mc_version.0,
        build.mod_version,
        loaders,
        build.release_type.as_str(),
        build.extensions.join(","),
        status
    );
    if show_urls {
        for download in &build.downloads {
            println!("    {}  {}", download.name, download.url);
        }
    }
}
