use serde::Serialize;

/// Column names of the output CSV, in order.
pub const CSV_HEADER: [&str; 7] = [
    "painting_number",
    "fruit",
    "authors",
    "subjects",
    "year",
    "thumbnail_image",
    "image",
];

/// One watercolor as it appears in the output dataset.
///
/// Field order matches `CSV_HEADER`; a missing year serializes as an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaintingRecord {
    pub painting_number: u32,
    pub fruit: String,
    pub authors: String,
    pub subjects: String,
    pub year: Option<i32>,
    #[serde(rename = "thumbnail_image")]
    pub thumbnail_image_url: String,
    #[serde(rename = "image")]
    pub image_url: String,
}
