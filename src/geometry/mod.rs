//! Geometric primitives for OCR page analysis.
//!
//! These types mirror the JSON emitted by the document-analysis step: words
//! carry only a horizontal extent (fractions of the page width, 0.0 - 1.0) and
//! are grouped into lines; tables carry rows of cells with text and
//! confidence. Vertical position is never modeled at word level, line
//! membership stands in for it.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A single OCR word with its horizontal extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Recognized text
    pub text: String,
    /// Left edge as a fraction of page width
    pub left: f32,
    /// Right edge as a fraction of page width
    pub right: f32,
}

impl Word {
    /// Create a new word.
    ///
    /// # Examples
    ///
    /// ```
    /// use rh_standardize::geometry::Word;
    ///
    /// let word = Word::new("1991", 0.05, 0.09);
    /// assert_eq!(word.text, "1991");
    /// assert!((word.width() - 0.04).abs() < 1e-6);
    /// ```
    pub fn new(text: impl Into<String>, left: f32, right: f32) -> Self {
        Self {
            text: text.into(),
            left,
            right,
        }
    }

    /// Horizontal extent of the word.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// An ordered, left-to-right run of words forming one visual text line.
pub type Line = Vec<Word>;

/// Join the text of a sequence of words with single spaces.
///
/// # Examples
///
/// ```
/// use rh_standardize::geometry::{join_words, Word};
///
/// let words = vec![Word::new("AMT", 0.4, 0.43), Word::new("MISS", 0.44, 0.48)];
/// assert_eq!(join_words(&words), "AMT MISS");
/// ```
pub fn join_words<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = &'a Word>,
{
    words
        .into_iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One cell of an OCR table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextractCell {
    /// Cell text as recognized
    pub text: String,
    /// Left edge as a fraction of page width
    pub left: f32,
    /// Right edge as a fraction of page width
    pub right: f32,
    /// Structural confidence of the cell
    #[serde(default)]
    pub confidence: Option<f32>,
    /// Text recognition confidence of the cell
    #[serde(default)]
    pub ocr_confidence: Option<f32>,
}

impl TextractCell {
    /// Create a cell with no confidence values.
    pub fn new(text: impl Into<String>, left: f32, right: f32) -> Self {
        Self {
            text: text.into(),
            left,
            right,
            confidence: None,
            ocr_confidence: None,
        }
    }

    /// Column boundary covered by this cell.
    pub fn position(&self) -> ColumnPosition {
        ColumnPosition::new(self.left, self.right)
    }
}

/// One row of an OCR table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextractRow {
    /// Structural confidence of the row
    #[serde(default)]
    pub confidence: Option<f32>,
    /// Text recognition confidence of the row
    #[serde(default)]
    pub ocr_confidence: Option<f32>,
    /// Cells, left to right
    #[serde(default)]
    pub cells: Vec<TextractCell>,
}

impl TextractRow {
    /// Create a row from cells with no confidence values.
    pub fn from_cells(cells: Vec<TextractCell>) -> Self {
        Self {
            confidence: None,
            ocr_confidence: None,
            cells,
        }
    }
}

/// A table detected by the OCR service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextractTable {
    /// Table classification reported by the service
    #[serde(default, rename = "type")]
    pub table_type: Option<String>,
    /// Structural confidence of the table
    #[serde(default)]
    pub confidence: Option<f32>,
    /// Text recognition confidence of the table contents
    #[serde(default)]
    pub ocr_confidence: Option<f32>,
    /// Rows, top to bottom
    #[serde(default)]
    pub rows: Vec<TextractRow>,
}

impl TextractTable {
    /// Create a table from rows with no type or confidence values.
    pub fn from_rows(rows: Vec<TextractRow>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }
}

/// The complete OCR output for one scanned page.
///
/// The page is the sole input to the engine and is never mutated by it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Rotation the service applied to read the page
    #[serde(default)]
    pub page_orientation_degrees: Option<f32>,
    /// Tables, in the order the service reported them
    #[serde(default)]
    pub tables: Vec<TextractTable>,
    /// Text lines, top to bottom
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Page {
    /// Create a page from tables and already grouped lines.
    pub fn new(tables: Vec<TextractTable>, lines: Vec<Line>) -> Self {
        Self {
            page_orientation_degrees: None,
            tables,
            lines,
        }
    }

    /// Decode a page from the JSON shape produced by the OCR step.
    ///
    /// # Examples
    ///
    /// ```
    /// use rh_standardize::geometry::Page;
    ///
    /// let page = Page::from_json(r#"{"tables": [], "lines": [[{"text": "1991", "left": 0.05, "right": 0.09}]]}"#).unwrap();
    /// assert_eq!(page.lines.len(), 1);
    /// assert!(page.page_orientation_degrees.is_none());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Joined text of the line at `index`, or `None` if out of range.
    pub fn line_text(&self, index: usize) -> Option<String> {
        self.lines.get(index).map(|line| join_words(line))
    }
}

/// A named column's horizontal boundary on the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnPosition {
    /// Left boundary as a fraction of page width
    pub left: f32,
    /// Right boundary as a fraction of page width
    pub right: f32,
}

impl ColumnPosition {
    /// Create a new column boundary.
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Width of the column.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Smallest boundary covering both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rh_standardize::geometry::ColumnPosition;
    ///
    /// let a = ColumnPosition::new(0.10, 0.20);
    /// let b = ColumnPosition::new(0.40, 0.55);
    /// let span = a.span(&b);
    /// assert_eq!(span.left, 0.10);
    /// assert_eq!(span.right, 0.55);
    /// ```
    pub fn span(&self, other: &ColumnPosition) -> ColumnPosition {
        ColumnPosition::new(self.left.min(other.left), self.right.max(other.right))
    }

    /// Check whether an extent lies inside this column, widened by `tolerance`
    /// on both sides.
    ///
    /// Boundaries are inclusive, so an extent exactly on the stored edges is
    /// always within the column.
    ///
    /// # Examples
    ///
    /// ```
    /// use rh_standardize::geometry::ColumnPosition;
    ///
    /// let col = ColumnPosition::new(0.20, 0.30);
    /// assert!(col.contains(0.20, 0.30, 0.0));
    /// assert!(col.contains(0.195, 0.305, 0.01));
    /// assert!(!col.contains(0.25, 0.35, 0.01));
    /// ```
    pub fn contains(&self, left: f32, right: f32, tolerance: f32) -> bool {
        left >= self.left - tolerance && right <= self.right + tolerance
    }

    /// Check whether a word lies inside this column under `tolerance`.
    pub fn contains_word(&self, word: &Word, tolerance: f32) -> bool {
        self.contains(word.left, word.right, tolerance)
    }
}
