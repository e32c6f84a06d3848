//! Layout of the collection's faceted search listing.

use scraper::{Html, Selector};
use url::Url;

use crate::catalog::CatalogError;

/// Records per listing page. Fixed by the catalog.
pub const PAGE_SIZE: usize = 20;
pub const COLLECTION_FACET: &str = "USDA Pomological Watercolor Collection";

const SEARCH_PATH: &str = "naldc/search.xhtml";

/// A parsed listing page.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub start: usize,
    pub url: Url,
    /// Outer HTML of every result cell, in listing order.
    pub cells: Vec<String>,
    /// Collection size from the pagination summary, if the page shows one.
    pub total: Option<usize>,
}

impl ListingPage {
    pub fn parse(start: usize, url: Url, body: &str) -> Result<Self, CatalogError> {
        let document = Html::parse_document(body);
        Ok(Self {
            start,
            url,
            cells: result_cells(&document)?,
            total: total_count(&document),
        })
    }
}

pub fn page_start(index: usize) -> usize {
    index - index % PAGE_SIZE
}

pub fn page_url(base: &Url, start: usize) -> Result<Url, CatalogError> {
    let mut url = base.join(SEARCH_PATH)?;
    url.query_pairs_mut()
        .append_pair("start", &start.to_string())
        .append_pair("collectionFacet", COLLECTION_FACET);
    Ok(url)
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

fn result_cells(document: &Html) -> Result<Vec<String>, CatalogError> {
    let container = document
        .select(&selector("div.grid_12"))
        .next()
        .ok_or_else(|| CatalogError::Listing("no div.grid_12 results container".to_string()))?;

    Ok(container
        .select(&selector(".document.blacklight-pdf"))
        .map(|cell| cell.html())
        .collect())
}

/// Reads "1 - 20 of 7,584" style summaries: the last number shown is the total.
fn total_count(document: &Html) -> Option<usize> {
    let last = document.select(&selector(".page_entries strong")).last()?;
    let digits: String = last
        .text()
        .collect::<String>()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    const SEARCH_PAGE: &str = include_str!("../../tests/data/search_page.html");

    #[test]
    fn test_page_start_rounds_down() {
        assert_eq!(page_start(0), 0);
        assert_eq!(page_start(19), 0);
        assert_eq!(page_start(20), 20);
        assert_eq!(page_start(7583), 7580);
    }

    #[test]
    fn test_page_url_matches_catalog_query() -> Result<()> {
        let base = Url::parse("https://naldc-legacy.nal.usda.gov/")?;
        let url = page_url(&base, 40)?;
        assert_eq!(
            url.as_str(),
            "https://naldc-legacy.nal.usda.gov/naldc/search.xhtml?start=40&collectionFacet=USDA+Pomological+Watercolor+Collection"
        );
        Ok(())
    }

    #[test]
    fn test_parse_search_page() -> Result<()> {
        let url = Url::parse("https://naldc-legacy.nal.usda.gov/naldc/search.xhtml?start=0")?;
        let page = ListingPage::parse(0, url, SEARCH_PAGE)?;

        assert_eq!(page.cells.len(), 3);
        assert_eq!(page.total, Some(7584));
        assert!(page.cells[0].contains("POM00001"));
        assert!(page.cells[2].contains("POM00003"));
        // The sidebar teaser lives outside the results container.
        assert!(page.cells.iter().all(|c| !c.contains("POM09999")));
        Ok(())
    }

    #[test]
    fn test_page_without_results_container() -> Result<()> {
        let url = Url::parse("https://naldc-legacy.nal.usda.gov/naldc/search.xhtml?start=0")?;
        let err = ListingPage::parse(0, url, "<html><body><p>Service unavailable</p></body></html>").unwrap_err();
        assert!(matches!(err, CatalogError::Listing(_)));
        Ok(())
    }

    #[test]
    fn test_empty_results_page() -> Result<()> {
        let url = Url::parse("https://naldc-legacy.nal.usda.gov/naldc/search.xhtml?start=9000")?;
        let body = r#"<html><body><div class="grid_12"><p>No entries found</p></div></body></html>"#;
        let page = ListingPage::parse(9000, url, body)?;
        assert!(page.cells.is_empty());
        assert_eq!(page.total, None);
        Ok(())
    }
}
