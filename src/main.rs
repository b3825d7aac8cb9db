//! `license-reportr`: turn dependency manifests into open source license reports.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging.
//! 2. Load report config ([`config::load_config`]) and apply CLI overrides.
//! 3. Read manifest records from POMs or a JSON record file ([`manifest`]).
//! 4. Build the project list ([`builder::build_all`]); licenses are deduplicated
//!    by URL and matched against the [`license::catalog`] only when rendering.
//! 5. Write the enabled reports and copy them to asset directories ([`report`]).
//! 6. Print a terminal summary.

mod builder;
mod cli;
mod config;
mod error;
mod license;
mod manifest;
mod models;
mod report;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::Cli;
use config::load_config;
use license::catalog::LicenseCatalog;
use license::text::LicenseTexts;
use manifest::json::JsonRecordReader;
use manifest::pom::PomReader;
use manifest::ManifestReader;
use report::csv::CsvReport;
use report::html::HtmlReport;
use report::json::JsonReport;
use report::text::TextReport;
use report::Report;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let catalog = LicenseCatalog::global();
    if cli.list_licenses {
        report::terminal::render_catalog(catalog);
        return Ok(());
    }

    // Resolve manifest path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());
    let config_root = if path.is_dir() {
        path.clone()
    } else {
        path.parent().map(|p| p.to_path_buf()).unwrap_or_default()
    };

    let mut reports = load_config(&config_root, cli.config.as_deref())?.reports;
    reports.apply_cli(&cli);

    let records = match &cli.records {
        Some(file) => JsonRecordReader::new().read(file)?,
        None => PomReader::new(!cli.quiet).read(&path)?,
    };

    if !cli.quiet {
        eprintln!("  {} {} dependencies", "→".cyan(), records.len());
    }

    let projects = builder::build_all(&records, &reports.ignored_patterns);

    let texts = match &reports.license_texts_dir {
        Some(dir) => LicenseTexts::load(dir, catalog)?,
        None => LicenseTexts::default(),
    };
    if reports.html && texts.is_empty() {
        log::info!("No license texts configured; known licenses are listed without their text.");
    } else {
        log::debug!("loaded {} license texts", texts.len());
    }

    let csv = CsvReport::new(&projects);
    let html = HtmlReport::new(&projects, catalog, &texts, reports.show_versions);
    let json = JsonReport::new(&projects);
    let text = TextReport::new(&projects);

    let enabled: [(bool, bool, &dyn Report); 4] = [
        (reports.csv, reports.copy_csv_to_assets, &csv),
        (reports.html, reports.copy_html_to_assets, &html),
        (reports.json, reports.copy_json_to_assets, &json),
        (reports.text, reports.copy_text_to_assets, &text),
    ];

    for (generate, copy, report) in enabled {
        if !generate {
            continue;
        }
        let file = report::write_report(&cli.output_dir, &cli.name, report)?;
        if copy && !cli.assets_dirs.is_empty() {
            report::copy_report(&file, &cli.assets_dirs, report)?;
        }
    }

    report::terminal::render(&projects, catalog, &path, cli.verbose, cli.quiet);

    Ok(())
}

/// `info` by default, `debug` with `--verbose`, `warn` with `--quiet`.
/// `RUST_LOG` takes precedence.
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
