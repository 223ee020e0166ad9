//! Row segmentation of the registration table.
//!
//! The table starts below the line carrying [`TABLE_ANCHOR`]. From there each
//! line whose first word contains a four-digit run opens the row for that
//! registration year. A line matching the terminal pattern ends the table,
//! and every other line continues the most recent row (wrapped reasons,
//! tenant names, lease end dates).

use crate::geometry::{join_words, Line, Word};
use crate::table::{CleanRow, CleanTable};
use lazy_static::lazy_static;
use regex::Regex;

/// Section heading that precedes the registration table.
pub const TABLE_ANCHOR: &str = "REGISTRATION APARTMENT INFORMATION";

lazy_static! {
    /// Four-digit run marking a registration year
    static ref RE_YEAR: Regex = Regex::new(r"\d{4}").unwrap();

    /// Lines that close the registration table
    static ref RE_TERMINAL: Regex = Regex::new(r"^(?:Advisory|APARTMENT)|appended").unwrap();
}

/// Rows recovered from a page, or the reason none could be.
#[derive(Debug, Clone, PartialEq)]
pub enum Segmentation {
    /// The anchor was found; rows follow in document order
    Rows {
        /// Index of the anchor line
        anchor_line: usize,
        /// One row per distinct registration year
        rows: CleanTable,
    },
    /// No line carries the anchor phrase
    AnchorNotFound,
}

impl Segmentation {
    /// Rows found, empty when the anchor is missing.
    pub fn into_rows(self) -> CleanTable {
        match self {
            Segmentation::Rows { rows, .. } => rows,
            Segmentation::AnchorNotFound => Vec::new(),
        }
    }
}

/// Index of the first line containing [`TABLE_ANCHOR`].
pub fn find_anchor(lines: &[Line]) -> Option<usize> {
    lines
        .iter()
        .position(|line| join_words(line).contains(TABLE_ANCHOR))
}

/// Registration year carried by a line's first word, if any.
///
/// # Examples
///
/// ```
/// use rh_standardize::geometry::Word;
/// use rh_standardize::layout::row_segmenter::year_token;
///
/// let line = vec![Word::new("1991(I)", 0.05, 0.1), Word::new("RS", 0.12, 0.14)];
/// assert_eq!(year_token(&line), Some("1991"));
/// assert_eq!(year_token(&[]), None);
/// ```
pub fn year_token(line: &[Word]) -> Option<&str> {
    line.first()
        .and_then(|word| RE_YEAR.find(&word.text))
        .map(|m| m.as_str())
}

/// Check whether joined line text closes the registration table.
pub fn is_terminal(text: &str) -> bool {
    RE_TERMINAL.is_match(text)
}

/// Partition the page's lines into one row per registration year.
///
/// A year that already has a row does not open a second one; its line joins
/// the existing row, which becomes the current row again. Lines between the
/// anchor and the first year row are skipped.
pub fn segment_rows(lines: &[Line]) -> Segmentation {
    let Some(anchor_line) = find_anchor(lines) else {
        log::info!("Table anchor {:?} not found in {} lines", TABLE_ANCHOR, lines.len());
        return Segmentation::AnchorNotFound;
    };
    log::debug!("Table anchor found on line {}", anchor_line);

    let mut rows: CleanTable = Vec::new();
    let mut current: Option<usize> = None;

    for (index, line) in lines.iter().enumerate().skip(anchor_line + 1) {
        if let Some(year) = year_token(line) {
            match rows.iter().position(|row| row.reg_year() == year) {
                Some(existing) => {
                    log::debug!("Year {} repeated on line {}, continuing its row", year, index);
                    rows[existing].line_indexes.push(index);
                    current = Some(existing);
                },
                None => {
                    rows.push(CleanRow::new(year, index));
                    current = Some(rows.len() - 1);
                },
            }
            continue;
        }

        let text = join_words(line);
        if is_terminal(&text) {
            log::debug!("Terminal line {} ends the table: {:?}", index, text);
            break;
        }

        match current {
            Some(row) => rows[row].line_indexes.push(index),
            None => log::trace!("Skipping pre-table line {}: {:?}", index, text),
        }
    }

    log::debug!("Segmented {} registration rows", rows.len());
    Segmentation::Rows { anchor_line, rows }
}
