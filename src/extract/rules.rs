//! Where each field lives inside a listing result cell.
//!
//! Every rule names a CSS class and which occurrence of it carries the value.
//! The catalog marks both the `<dt>` label and the `<dd>` value with the same
//! class, so value rules pick occurrence 1. When the catalog markup drifts,
//! these constants are the only thing that should need to change.

use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub class: &'static str,
    pub occurrence: usize,
}

/// "POM00001. Malus domestica: Ben Davis": painting number, then fruit.
pub const NAME: FieldRule = FieldRule {
    field: "name",
    class: "blacklight-extent_format_facet",
    occurrence: 0,
};

pub const AUTHORS: FieldRule = FieldRule {
    field: "authors",
    class: "blacklight-name_facet",
    occurrence: 1,
};

pub const SUBJECTS: FieldRule = FieldRule {
    field: "subjects",
    class: "blacklight-subject",
    occurrence: 1,
};

pub const YEAR: FieldRule = FieldRule {
    field: "year",
    class: "blacklight-year_facet",
    occurrence: 1,
};

/// Holds an `<img>` whose `src` is the thumbnail.
pub const THUMBNAIL: FieldRule = FieldRule {
    field: "thumbnail_image",
    class: "blacklight-specimen_identifier_s",
    occurrence: 1,
};

impl FieldRule {
    fn selector(&self) -> Selector {
        Selector::parse(&format!(".{}", self.class)).expect("field class must form a valid selector")
    }

    pub fn element<'a>(&self, fragment: &'a Html) -> Option<ElementRef<'a>> {
        fragment.select(&self.selector()).nth(self.occurrence)
    }

    /// Whitespace-normalized text of the matched element.
    pub fn text(&self, fragment: &Html) -> Option<String> {
        self.element(fragment)
            .map(|el| clean_text(&el.text().collect::<String>()))
            .filter(|text| !text.is_empty())
    }
}

/// Drops newlines and tabs and collapses runs of spaces.
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits the name line into (painting number, fruit).
pub fn split_name(name: &str) -> (Option<u32>, String) {
    let (number, fruit) = match name.split_once('.') {
        Some((number, fruit)) => (number, fruit.trim()),
        None => (name, ""),
    };
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.parse().ok(), fruit.to_string())
}

/// First run of digits in the year cell, e.g. "ca. 1907" -> 1907.
pub fn parse_year(text: &str) -> Option<i32> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

pub fn thumbnail_src(fragment: &Html) -> Option<String> {
    let img = Selector::parse("img").expect("static selector must parse");
    THUMBNAIL
        .element(fragment)?
        .select(&img)
        .next()?
        .value()
        .attr("src")
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty())
}
