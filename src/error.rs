//! Error types for rent-history standardization.
//!
//! Only missing required inputs are errors. Data-quality problems (unreadable
//! dates, unmatched columns, OCR noise) surface as `None` fields on the rows
//! instead, and a page without the table anchor is reported through
//! [`TableStatus::NoTableFound`](crate::standardizer::TableStatus).

/// Result type alias for standardization operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while standardizing a page.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page carries no OCR tables, so no header row can be read
    #[error("Page has no tables to resolve columns from")]
    NoTables,

    /// The first table has no rows, or its first row has no cells
    #[error("Table {table} has no header row")]
    MissingHeaderRow {
        /// Index of the table that was inspected
        table: usize,
    },

    /// Configuration value outside its valid range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON decoding or encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
