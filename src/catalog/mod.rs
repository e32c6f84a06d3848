pub mod http;
pub mod listing;

use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog unreachable: {0}")]
    Unreachable(reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Record {0} not found in catalog")]
    NotFound(usize),

    #[error("Malformed listing page: {0}")]
    Listing(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        CatalogError::Transport(err)
    }
}

impl CatalogError {
    /// Reclassifies a failed connection as the catalog being unreachable.
    /// Only meaningful on first contact; later connect failures stay per-record.
    pub fn on_first_contact(self) -> Self {
        match self {
            CatalogError::Transport(err) if err.is_connect() => CatalogError::Unreachable(err),
            other => other,
        }
    }

    /// Whether the run can carry on with the next record after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CatalogError::Unreachable(_))
    }
}

/// The raw detail representation of a single catalog entry.
#[derive(Debug, Clone)]
pub struct RecordPage {
    pub index: usize,
    /// HTML fragment holding the record's metadata.
    pub html: String,
    /// Page the fragment was read from; relative links resolve against it.
    pub source_url: Url,
}

/// A remote collection addressed by record index.
pub trait Catalog {
    /// First contact with the catalog, made once before the first record.
    fn connect(&mut self, _first_index: usize) -> Result<(), CatalogError> {
        Ok(())
    }

    fn total_records(&mut self) -> Result<usize, CatalogError>;

    fn fetch_record(&mut self, index: usize) -> Result<RecordPage, CatalogError>;

    fn fetch_image(&mut self, url: &str) -> Result<Vec<u8>, CatalogError>;
}
