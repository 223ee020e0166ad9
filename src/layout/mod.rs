//! Layout analysis for scanned rent registration pages.
//!
//! This module recovers the table structure the OCR service did not reliably
//! preserve:
//! - Line reconstruction from a flat word stream
//! - Column boundary resolution from the header row
//! - Row segmentation into one line group per registration year

pub mod column_resolver;
pub mod line_builder;
pub mod row_segmenter;

// Re-export main types
pub use column_resolver::{resolve_columns, resolve_header, Column, ColumnMap};
pub use line_builder::{group_words_into_lines, reconstruct_lines};
pub use row_segmenter::{segment_rows, Segmentation, TABLE_ANCHOR};
