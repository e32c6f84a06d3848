use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context, anyhow};
use clap::ValueEnum;
use url::Url;

pub const DEFAULT_CSV_NAME: &str = "usda_pomological_watercolors.csv";
pub const DEFAULT_IMAGES_DIR: &str = "images";
pub const DEFAULT_BASE_URL: &str = "https://naldc-legacy.nal.usda.gov";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How an existing CSV file is treated when a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WriteMode {
    /// Keep existing rows, add new ones after them.
    #[default]
    Append,
    /// Discard the file's contents and start over with a fresh header.
    Truncate,
}

/// Settings for one collection run.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub start: usize,
    /// Exclusive upper bound. `None` means "ask the catalog how many records it has".
    pub end: Option<usize>,
    pub csv_name: PathBuf,
    pub images_dir: PathBuf,
    pub write_mode: WriteMode,
    pub verbose: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            csv_name: PathBuf::from(DEFAULT_CSV_NAME),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            write_mode: WriteMode::default(),
            verbose: false,
        }
    }
}

pub struct CatalogConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        if timeout_secs == 0 {
            return Err(anyhow!("timeout must be at least one second"));
        }
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parses the catalog root and makes sure it ends with `/`, so relative
/// joins land underneath it instead of replacing its last segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("Invalid catalog URL: {}", raw))?;
    if url.cannot_be_a_base() {
        return Err(anyhow!("Catalog URL cannot be used as a base: {}", raw));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() -> Result<()> {
        let url = parse_base_url("http://127.0.0.1:8080/mirror")?;
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/mirror/");
        assert_eq!(
            url.join("naldc/search.xhtml")?.as_str(),
            "http://127.0.0.1:8080/mirror/naldc/search.xhtml"
        );

        let root = parse_base_url(DEFAULT_BASE_URL)?;
        assert_eq!(root.as_str(), "https://naldc-legacy.nal.usda.gov/");
        Ok(())
    }

    #[test]
    fn test_rejects_bad_catalog_settings() {
        assert!(parse_base_url("not a url").is_err());
        assert!(parse_base_url("mailto:someone@example.com").is_err());
        assert!(CatalogConfig::new(DEFAULT_BASE_URL, 0).is_err());
        assert!(CatalogConfig::new(DEFAULT_BASE_URL, 5).is_ok());
    }

    #[test]
    fn test_default_run_covers_whole_catalog() {
        let config = CollectorConfig::default();
        assert_eq!(config.start, 0);
        assert_eq!(config.end, None);
        assert_eq!(config.csv_name, PathBuf::from("usda_pomological_watercolors.csv"));
        assert_eq!(config.write_mode, WriteMode::Append);
        assert!(!config.verbose);
    }
}
