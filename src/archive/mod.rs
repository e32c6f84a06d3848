pub mod record;
pub mod csv_sink;
pub mod image_store;
pub mod mimetype;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Payload for painting {painting_number} is not an image ({mime})")]
    NotAnImage { painting_number: u32, mime: String },
}
