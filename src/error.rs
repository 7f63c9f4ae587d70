use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Expected {expected} non-empty cells, found {found}")]
    CellCount { expected: usize, found: usize },

    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Unknown month abbreviation: {0:?}")]
    UnknownMonth(String),

    #[error("Athlete row found before any team header")]
    OrphanAthlete,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
