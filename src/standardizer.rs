//! The standardization pipeline.
//!
//! ```text
//! Page (lines + tables)
//!     ↓
//! [segment_rows]     anchor phrase, one CleanRow per year
//!     ↓
//! [resolve_columns]  header row → ColumnMap
//!     ↓
//! [extract_row]      field extractors, row by row
//!     ↓
//! CleanTable
//! ```
//!
//! Every stage is a free function over borrowed input; the [`Standardizer`]
//! only holds the configuration and the quality scorer. The page is never
//! mutated, and the table is never touched again once returned.

use crate::config::StandardizeConfig;
use crate::error::Result;
use crate::extractors::{extract_row, RowContext};
use crate::geometry::Page;
use crate::layout::{resolve_columns, segment_rows, ColumnMap, Segmentation};
use crate::quality::{PlaceholderScorer, QualityScorer, QualitySignals};
use crate::table::CleanTable;

/// Whether a table was located on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// The anchor was found and rows were parsed (possibly none)
    Parsed,
    /// The anchor phrase is missing; the table is empty
    NoTableFound,
}

/// Result of standardizing one page.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardized {
    /// Rows in document order
    pub table: CleanTable,
    /// Whether the table anchor was found
    pub status: TableStatus,
    /// Column boundaries the rows were parsed with (empty when no table was found)
    pub columns: ColumnMap,
}

impl Standardized {
    fn no_table() -> Self {
        Self {
            table: Vec::new(),
            status: TableStatus::NoTableFound,
            columns: ColumnMap::new(),
        }
    }

    /// Check whether the anchor phrase was missing.
    pub fn is_no_table_found(&self) -> bool {
        self.status == TableStatus::NoTableFound
    }
}

/// Page standardizer holding configuration and a quality scorer.
pub struct Standardizer {
    config: StandardizeConfig,
    scorer: Box<dyn QualityScorer>,
}

impl Standardizer {
    /// Create a standardizer with default configuration.
    pub fn new() -> Self {
        Self::with_config(StandardizeConfig::default())
    }

    /// Create a standardizer with custom configuration.
    pub fn with_config(config: StandardizeConfig) -> Self {
        Self {
            config,
            scorer: Box::new(PlaceholderScorer::default()),
        }
    }

    /// Replace the quality scorer.
    ///
    /// # Examples
    ///
    /// ```
    /// use rh_standardize::quality::QualitySignals;
    /// use rh_standardize::{Page, Standardizer};
    ///
    /// let standardizer = Standardizer::new()
    ///     .with_scorer(|signals: &QualitySignals| signals.row_count as f32);
    /// assert_eq!(standardizer.score(&Page::default(), &Vec::new()), 0.0);
    /// ```
    pub fn with_scorer<S>(mut self, scorer: S) -> Self
    where
        S: QualityScorer + 'static,
    {
        self.scorer = Box::new(scorer);
        self
    }

    /// Get the active configuration.
    pub fn config(&self) -> &StandardizeConfig {
        &self.config
    }

    /// Standardize one page into a table of registration rows.
    ///
    /// A page without the table anchor yields an empty table with
    /// [`TableStatus::NoTableFound`].
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, or when the anchor is present but
    /// the page has no table header row to resolve columns from.
    pub fn standardize(&self, page: &Page) -> Result<Standardized> {
        self.config.validate()?;

        let mut table = match segment_rows(&page.lines) {
            Segmentation::AnchorNotFound => return Ok(Standardized::no_table()),
            Segmentation::Rows { rows, .. } => rows,
        };

        let columns = resolve_columns(page, &self.config)?;
        if !columns.is_complete() {
            log::debug!("Parsing rows with columns missing: {:?}", columns.missing());
        }

        for row in table.iter_mut() {
            let ctx = RowContext::for_row(&page.lines, row, &columns, &self.config);
            extract_row(row, &ctx);
        }

        log::info!(
            "Standardized {} rows ({} full-row statuses)",
            table.len(),
            table.iter().filter(|r| r.is_full_row_stat).count()
        );

        Ok(Standardized {
            table,
            status: TableStatus::Parsed,
            columns,
        })
    }

    /// Score a page and its standardized table.
    pub fn score(&self, page: &Page, table: &CleanTable) -> f32 {
        let signals = QualitySignals::collect(page, table);
        let score = self.scorer.score(&signals);
        log::debug!("Page score {} from {:?}", score, signals);
        score
    }
}

impl Default for Standardizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Standardizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Standardizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Standardize a page with default configuration.
///
/// # Examples
///
/// ```
/// use rh_standardize::{standardize, Page, TableStatus};
///
/// let result = standardize(&Page::default()).unwrap();
/// assert!(result.table.is_empty());
/// assert_eq!(result.status, TableStatus::NoTableFound);
/// ```
pub fn standardize(page: &Page) -> Result<Standardized> {
    Standardizer::new().standardize(page)
}
