//! Error types for Sift

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Statement has no rows")]
    EmptyStatement,

    #[error("No header row found: expected a row containing both 'date' and 'narration' columns")]
    MissingHeader,

    #[error("Header row is missing required column: {0}")]
    MissingColumn(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
