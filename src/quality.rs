//! Page-level quality scoring.
//!
//! The scorer is an extension point. [`QualitySignals`] gathers the raw OCR
//! confidence and completeness inputs for a page; a [`QualityScorer`] turns
//! them into one number. No formula is built in: [`PlaceholderScorer`]
//! returns a fixed value, and any closure over the signals can replace it.
//! Scoring only reads the table, it never changes it.

use crate::geometry::Page;
use crate::table::{CleanTable, VALUE_FIELD_COUNT};

/// Score returned by the default scorer.
pub const PLACEHOLDER_SCORE: f32 = 1.0;

/// Raw inputs available to a scorer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QualitySignals {
    /// Structural confidence of the first table
    pub table_confidence: Option<f32>,
    /// Text recognition confidence of the first table
    pub table_ocr_confidence: Option<f32>,
    /// Mean confidence over the first table's rows that report one
    pub mean_row_confidence: Option<f32>,
    /// Mean OCR confidence over the first table's cells that report one
    pub mean_cell_ocr_confidence: Option<f32>,
    /// Number of standardized rows
    pub row_count: usize,
    /// Rows whose status text claimed the whole row
    pub full_row_status_count: usize,
    /// Rows with every value field populated
    pub complete_row_count: usize,
    /// Mean fraction of populated value fields over regular rows
    pub mean_field_completeness: Option<f32>,
}

impl QualitySignals {
    /// Collect signals from a page and its standardized table.
    pub fn collect(page: &Page, table: &CleanTable) -> Self {
        let first = page.tables.first();
        let row_confidences: Vec<f32> = first
            .into_iter()
            .flat_map(|t| t.rows.iter())
            .filter_map(|r| r.confidence)
            .collect();
        let cell_confidences: Vec<f32> = first
            .into_iter()
            .flat_map(|t| t.rows.iter())
            .flat_map(|r| r.cells.iter())
            .filter_map(|c| c.ocr_confidence)
            .collect();

        let regular: Vec<_> = table.iter().filter(|r| !r.is_full_row_stat).collect();
        let completeness: Vec<f32> = regular
            .iter()
            .map(|r| r.populated_value_fields() as f32 / VALUE_FIELD_COUNT as f32)
            .collect();

        Self {
            table_confidence: first.and_then(|t| t.confidence),
            table_ocr_confidence: first.and_then(|t| t.ocr_confidence),
            mean_row_confidence: mean(&row_confidences),
            mean_cell_ocr_confidence: mean(&cell_confidences),
            row_count: table.len(),
            full_row_status_count: table.len() - regular.len(),
            complete_row_count: regular
                .iter()
                .filter(|r| r.populated_value_fields() == VALUE_FIELD_COUNT)
                .count(),
            mean_field_completeness: mean(&completeness),
        }
    }
}

fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}

/// Turns page signals into a single score.
pub trait QualityScorer {
    /// Score one page.
    fn score(&self, signals: &QualitySignals) -> f32;
}

/// Scorer returning a fixed value regardless of the signals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderScorer {
    /// Value returned for every page
    pub value: f32,
}

impl Default for PlaceholderScorer {
    fn default() -> Self {
        Self {
            value: PLACEHOLDER_SCORE,
        }
    }
}

impl QualityScorer for PlaceholderScorer {
    fn score(&self, _signals: &QualitySignals) -> f32 {
        self.value
    }
}

impl<F> QualityScorer for F
where
    F: Fn(&QualitySignals) -> f32,
{
    fn score(&self, signals: &QualitySignals) -> f32 {
        self(signals)
    }
}
