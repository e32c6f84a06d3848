pub mod rules;

use scraper::Html;
use thiserror::Error;
use tracing::debug;

use crate::archive::record::PaintingRecord;
use crate::catalog::RecordPage;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Record {index} has no painting number in {name:?}")]
    MissingPaintingNumber { index: usize, name: String },

    #[error("Record {0} has no image link")]
    MissingImage(usize),

    #[error("Record {index} has an unusable image link {src:?}: {source}")]
    BadImageUrl {
        index: usize,
        src: String,
        source: url::ParseError,
    },
}

/// Builds a `PaintingRecord` from one result cell.
///
/// Text fields that are absent come back empty. The painting number keys both
/// the row and the image file, and the image link is what gets downloaded, so
/// a record missing either is rejected.
pub fn extract_record(page: &RecordPage) -> Result<PaintingRecord, ExtractError> {
    let fragment = Html::parse_fragment(&page.html);

    let name = rules::NAME.text(&fragment).unwrap_or_default();
    let (number, fruit) = rules::split_name(&name);
    let painting_number = number.ok_or_else(|| ExtractError::MissingPaintingNumber {
        index: page.index,
        name: name.clone(),
    })?;

    let authors = field_or_empty(&fragment, rules::AUTHORS, page.index);
    let subjects = field_or_empty(&fragment, rules::SUBJECTS, page.index);
    let year = rules::YEAR.text(&fragment).and_then(|text| rules::parse_year(&text));
    if year.is_none() {
        debug!("Record {} has no usable {}", page.index, rules::YEAR.field);
    }

    let src = rules::thumbnail_src(&fragment).ok_or(ExtractError::MissingImage(page.index))?;
    let thumbnail = page.source_url.join(&src).map_err(|source| ExtractError::BadImageUrl {
        index: page.index,
        src: src.clone(),
        source,
    })?;
    let thumbnail_image_url = thumbnail.to_string();
    let image_url = thumbnail_image_url.replace("thumbnail", "screen");

    Ok(PaintingRecord {
        painting_number,
        fruit,
        authors,
        subjects,
        year,
        thumbnail_image_url,
        image_url,
    })
}

fn field_or_empty(fragment: &Html, rule: rules::FieldRule, index: usize) -> String {
    rule.text(fragment).unwrap_or_else(|| {
        debug!("Record {} has no {}", index, rule.field);
        String::new()
    })
}
