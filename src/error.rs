use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GiacenzaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File does not match the selected statement format")]
    FormatMismatch,

    #[error("Malformed date on line {line}: {value:?}")]
    MalformedDate { line: u64, value: String },

    #[error("Malformed amount on line {line}: {value:?}")]
    MalformedAmount { line: u64, value: String },

    #[error("Unknown calendar language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Transaction dated {date} appears after {previous}; transactions must be in ascending date order")]
    OutOfOrder { date: NaiveDate, previous: NaiveDate },

    #[error("Transaction dated {date} is outside year {year}")]
    OutsideYear { date: NaiveDate, year: i32 },

    #[error("Amount overflow while computing {0}")]
    Overflow(&'static str),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, GiacenzaError>;
