//! Field extraction for segmented registration rows.
//!
//! Extractors run in a fixed order over each row: apartment status (which
//! may claim the whole row), filing date, rents, reasons, lease start, lease
//! end, tenants. Each one reads the row's lines through a [`RowContext`] and
//! writes only its own fields.

pub mod dates;
pub mod fields;
pub mod patterns;

use crate::config::StandardizeConfig;
use crate::geometry::{ColumnPosition, Line, Word};
use crate::layout::row_segmenter::year_token;
use crate::layout::{Column, ColumnMap};
use crate::table::CleanRow;

pub use dates::{normalize_date, parse_date};
pub use fields::{
    extract_apt_status, extract_filing_date, extract_lease_end, extract_lease_start,
    extract_reasons, extract_rents, extract_tenants,
};

/// Signature shared by all field extractors.
pub type FieldExtractor = fn(&mut CleanRow, &RowContext<'_>);

/// Extractors in run order, with the name used in log output.
pub const EXTRACTORS: [(&str, FieldExtractor); 7] = [
    ("apt_status", extract_apt_status),
    ("filing_date", extract_filing_date),
    ("rents", extract_rents),
    ("reasons", extract_reasons),
    ("lease_start", extract_lease_start),
    ("lease_end", extract_lease_end),
    ("tenants", extract_tenants),
];

/// Read-only view of one row's lines and the page's column map.
#[derive(Debug, Clone)]
pub struct RowContext<'a> {
    /// The row's lines, in `line_indexes` order
    pub lines: Vec<&'a Line>,
    /// Column boundaries resolved for the page
    pub columns: &'a ColumnMap,
    /// Active configuration
    pub config: &'a StandardizeConfig,
}

impl<'a> RowContext<'a> {
    /// Create a context from already selected lines.
    pub fn from_lines(
        lines: Vec<&'a Line>,
        columns: &'a ColumnMap,
        config: &'a StandardizeConfig,
    ) -> Self {
        Self {
            lines,
            columns,
            config,
        }
    }

    /// Create a context for `row` from the page's lines.
    ///
    /// Indices outside `page_lines` are skipped.
    pub fn for_row(
        page_lines: &'a [Line],
        row: &CleanRow,
        columns: &'a ColumnMap,
        config: &'a StandardizeConfig,
    ) -> Self {
        let lines = row
            .line_indexes
            .iter()
            .filter_map(|&i| page_lines.get(i))
            .collect();
        Self::from_lines(lines, columns, config)
    }

    /// The row's first line (the one carrying the year).
    pub fn first_line(&self) -> Option<&'a Line> {
        self.lines.first().copied()
    }

    /// The line directly below the first one, unless it opens a record of
    /// its own (a repeated year merged into this row).
    pub fn second_line(&self) -> Option<&'a Line> {
        self.lines
            .get(1)
            .copied()
            .filter(|line| year_token(line).is_none())
    }

    /// Lines after the first that continue the record.
    ///
    /// Lines starting with a year token are skipped: they are the first lines
    /// of repeated-year records merged into this row.
    pub fn continuation_lines(&self) -> impl Iterator<Item = &'a Line> + '_ {
        self.lines
            .iter()
            .skip(1)
            .copied()
            .filter(|line| year_token(line).is_none())
    }

    /// Boundary of `column`, if resolved.
    pub fn column(&self, column: Column) -> Option<&'a ColumnPosition> {
        self.columns.get(column)
    }

    /// Check whether `word` falls inside `position` under the configured tolerance.
    pub fn within(&self, position: &ColumnPosition, word: &Word) -> bool {
        position.contains_word(word, self.config.column_tolerance)
    }
}

/// Run every extractor over `row`, in order.
pub fn extract_row(row: &mut CleanRow, ctx: &RowContext<'_>) {
    for (name, extractor) in EXTRACTORS {
        extractor(row, ctx);
        log::trace!("Row {}: ran {} extractor", row.reg_year(), name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_order() {
        let names: Vec<&str> = EXTRACTORS.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "apt_status",
                "filing_date",
                "rents",
                "reasons",
                "lease_start",
                "lease_end",
                "tenants"
            ]
        );
    }

    #[test]
    fn test_for_row_skips_out_of_range_indexes() {
        let page_lines: Vec<Line> = vec![vec![Word::new("1991", 0.05, 0.09)], vec![]];
        let mut row = CleanRow::new("1991", 0);
        row.line_indexes.push(5);
        let columns = ColumnMap::new();
        let config = StandardizeConfig::default();
        let ctx = RowContext::for_row(&page_lines, &row, &columns, &config);
        assert_eq!(ctx.lines.len(), 1);
        assert_eq!(ctx.first_line().unwrap()[0].text, "1991");
    }

    #[test]
    fn test_continuation_lines_skip_year_lines() {
        let page_lines: Vec<Line> = vec![
            vec![Word::new("2014", 0.05, 0.09), Word::new("RS", 0.12, 0.15)],
            vec![Word::new("2014", 0.05, 0.09), Word::new("RS", 0.12, 0.15)],
            vec![Word::new("TENANT:", 0.12, 0.17), Word::new("DOE", 0.2, 0.24)],
        ];
        let columns = ColumnMap::new();
        let config = StandardizeConfig::default();
        let ctx = RowContext::from_lines(page_lines.iter().collect(), &columns, &config);

        assert!(ctx.second_line().is_none());
        let rest: Vec<&Line> = ctx.continuation_lines().collect();
        assert_eq!(rest, vec![&page_lines[2]]);
    }

    #[test]
    fn test_within_uses_config_tolerance() {
        let columns = ColumnMap::new();
        let strict = StandardizeConfig::default().with_column_tolerance(0.0);
        let loose = StandardizeConfig::default().with_column_tolerance(0.02);
        let position = ColumnPosition::new(0.2, 0.3);
        let word = Word::new("RS", 0.19, 0.25);

        assert!(!RowContext::from_lines(vec![], &columns, &strict).within(&position, &word));
        assert!(RowContext::from_lines(vec![], &columns, &loose).within(&position, &word));
    }
}
