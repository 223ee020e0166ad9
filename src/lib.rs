// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # rh_standardize
//!
//! Rebuilds the year-by-year registration table of a scanned rent-registration
//! history page from its OCR geometry.
//!
//! OCR services recover words and lines reliably but lose most of the table
//! structure of these documents: header cells get merged, rows wrap over
//! several lines, and full-row statuses replace whole records. This crate
//! recovers that structure with positional heuristics and pattern matching.
//!
//! ## Pipeline
//!
//! 1. **Geometry** ([`geometry`]): words, lines, OCR tables and column boundaries
//! 2. **Line reconstruction** ([`layout::line_builder`]): regroup a flat word stream into lines
//! 3. **Column resolution** ([`layout::column_resolver`]): header row → named column boundaries
//! 4. **Row segmentation** ([`layout::row_segmenter`]): anchor phrase → one row per year
//! 5. **Field extraction** ([`extractors`]): status, dates, rents, reasons, tenants
//! 6. **Quality scoring** ([`quality`]): pluggable page-level score
//!
//! ## Quick Start
//!
//! ```no_run
//! use rh_standardize::{clean_table_to_json, Page, Standardizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = std::fs::read_to_string("page.json")?;
//! let page = Page::from_json(&json)?;
//!
//! let standardizer = Standardizer::new();
//! let result = standardizer.standardize(&page)?;
//! println!("{}", clean_table_to_json(&result.table)?);
//! println!("score: {}", standardizer.score(&page, &result.table));
//! # Ok(())
//! # }
//! ```
//!
//! A page without the registration table anchor is not an error: it gives an
//! empty table with [`TableStatus::NoTableFound`].

#![warn(missing_docs)]

// Error handling
pub mod error;

/// Standardization configuration
pub mod config;

// Input model
pub mod geometry;

// Output model
pub mod table;

// Line, column and row structure
pub mod layout;

// Per-field extraction
pub mod extractors;

// Page scoring
pub mod quality;

// Pipeline entry point
pub mod standardizer;

// Re-exports
pub use config::StandardizeConfig;
pub use error::{Error, Result};
pub use geometry::{ColumnPosition, Line, Page, TextractCell, TextractRow, TextractTable, Word};
pub use layout::{Column, ColumnMap};
pub use quality::{PlaceholderScorer, QualityScorer, QualitySignals};
pub use standardizer::{standardize, Standardized, Standardizer, TableStatus};
pub use table::{clean_table_to_json, CleanRow, CleanTable, RentAmount, RentKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
