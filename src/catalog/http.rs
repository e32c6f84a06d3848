use std::time::Duration;
use reqwest::blocking::{Client, Response};
use tracing::debug;
use url::Url;

use crate::catalog::{Catalog, CatalogError, RecordPage};
use crate::catalog::listing::{self, ListingPage};

/// Blocking HTTP session against the collection's search listing.
///
/// Owns the connection pool and the most recently fetched listing page for
/// the duration of one run, so twenty consecutive indices cost one request.
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
    cached_page: Option<ListingPage>,
}

impl HttpCatalog {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url,
            cached_page: None,
        })
    }

    fn get(&self, url: &Url) -> Result<Response, CatalogError> {
        let response = self.client.get(url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    fn load_page(&mut self, start: usize) -> Result<&ListingPage, CatalogError> {
        let cached = self.cached_page.as_ref().map(|page| page.start);
        if cached != Some(start) {
            self.cached_page = None;
            let url = listing::page_url(&self.base_url, start)?;
            debug!("Fetching listing page {}", url);
            let body = self.get(&url)?.text()?;
            self.cached_page = Some(ListingPage::parse(start, url, &body)?);
        }
        self.cached_page
            .as_ref()
            .ok_or_else(|| CatalogError::Listing(format!("page at {} was not retained", start)))
    }
}

impl Catalog for HttpCatalog {
    fn connect(&mut self, first_index: usize) -> Result<(), CatalogError> {
        self.load_page(listing::page_start(first_index))
            .map(|_| ())
            .map_err(CatalogError::on_first_contact)
    }

    fn total_records(&mut self) -> Result<usize, CatalogError> {
        let page = self.load_page(0).map_err(CatalogError::on_first_contact)?;
        page.total
            .ok_or_else(|| CatalogError::Listing("no record count in pagination summary".to_string()))
    }

    fn fetch_record(&mut self, index: usize) -> Result<RecordPage, CatalogError> {
        let start = listing::page_start(index);
        let page = self.load_page(start)?;
        let html = page
            .cells
            .get(index - start)
            .cloned()
            .ok_or(CatalogError::NotFound(index))?;
        Ok(RecordPage {
            index,
            html,
            source_url: page.url.clone(),
        })
    }

    fn fetch_image(&mut self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let url = Url::parse(url)?;
        debug!("Downloading image {}", url);
        let bytes = self.get(&url)?.bytes()?;
        Ok(bytes.to_vec())
    }
}
