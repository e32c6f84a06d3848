mod archive;
mod catalog;
mod collector;
mod extract;
mod utils;

use std::path::PathBuf;
use anyhow::{Result, Context};
use clap::Parser;
use tracing::info;

use crate::catalog::http::HttpCatalog;
use crate::collector::Collector;
use crate::utils::config::{
    CatalogConfig, CollectorConfig, WriteMode, DEFAULT_BASE_URL, DEFAULT_CSV_NAME,
    DEFAULT_IMAGES_DIR, DEFAULT_TIMEOUT_SECS,
};

/// Scrape paintings from the USDA Pomological Watercolor Collection.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Record index from which to begin collecting paintings.
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Record index at which to stop (exclusive). Defaults to the catalog's size.
    #[arg(long)]
    end: Option<usize>,

    /// CSV file to save data to.
    #[arg(long = "csv_name", default_value = DEFAULT_CSV_NAME)]
    csv_name: PathBuf,

    /// Directory to save painting images to.
    #[arg(long = "images_dir", default_value = DEFAULT_IMAGES_DIR)]
    images_dir: PathBuf,

    /// Whether an existing CSV keeps its rows or is started over.
    #[arg(long = "write_mode", value_enum, default_value_t = WriteMode::Append)]
    write_mode: WriteMode,

    /// Print one progress line per record.
    #[arg(long)]
    verbose: bool,

    /// Root URL of the catalog to collect from.
    #[arg(long = "base_url", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long = "timeout_secs", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let catalog_config = CatalogConfig::new(&args.base_url, args.timeout_secs)?;
    let config = CollectorConfig {
        start: args.start,
        end: args.end,
        csv_name: args.csv_name,
        images_dir: args.images_dir,
        write_mode: args.write_mode,
        verbose: args.verbose,
    };

    info!("Catalog: {}", catalog_config.base_url);
    info!("CSV: {:?} ({:?})", config.csv_name, config.write_mode);
    info!("Images: {:?}", config.images_dir);

    let catalog = HttpCatalog::new(catalog_config.base_url, catalog_config.timeout)
        .context("Failed to set up the HTTP client")?;
    let summary = Collector::new(catalog, config).run()?;

    info!(
        "Data successfully saved: {} of {} records collected",
        summary.written, summary.attempted
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = Args::parse_from(["pomological-collector"]);
        assert_eq!(args.start, 0);
        assert_eq!(args.end, None);
        assert_eq!(args.csv_name, PathBuf::from("usda_pomological_watercolors.csv"));
        assert_eq!(args.write_mode, WriteMode::Append);
        assert!(!args.verbose);
        assert_eq!(args.timeout_secs, 30);
        assert_eq!(args.base_url, "https://naldc-legacy.nal.usda.gov");
    }

    #[test]
    fn test_every_flag_has_help() {
        use clap::CommandFactory;

        let command = Args::command();
        for arg in command.get_arguments() {
            if matches!(arg.get_id().as_str(), "help" | "version") {
                continue;
            }
            assert!(arg.get_help().is_some(), "--{} has no help text", arg.get_id());
        }
    }

    #[test]
    fn test_cli_flags() {
        let args = Args::parse_from([
            "pomological-collector",
            "--start=20",
            "--end",
            "400",
            "--csv_name",
            "fruits.csv",
            "--write_mode",
            "truncate",
            "--verbose",
        ]);
        assert_eq!(args.start, 20);
        assert_eq!(args.end, Some(400));
        assert_eq!(args.csv_name, PathBuf::from("fruits.csv"));
        assert_eq!(args.write_mode, WriteMode::Truncate);
        assert!(args.verbose);
    }
}
