//! Column boundary resolution from the registration table's header row.
//!
//! The OCR service reports the header as a row of cells, but it regularly
//! merges adjacent header cells or drops the trailing ones. Resolution runs in
//! passes:
//!
//! 1. **Exact**: a header with one cell per column maps left to right.
//! 2. **Pattern**: each cell's text is tried against the per-column header
//!    patterns in column order; the first unassigned column that matches
//!    takes the cell. Cells that match nothing are held back.
//! 3. **Split**: a held-back cell reading "Apt Stat Filing Date" is divided in
//!    two. The apartment-status half gets
//!    [`MERGED_HEADER_SPLIT_RATIO`](crate::config::MERGED_HEADER_SPLIT_RATIO)
//!    times the registration-year column's width; the filing-date half gets
//!    the rest of the cell.
//! 4. **Lease synthesis**: a missing lease-dates column is derived from the
//!    right edge of the reasons column to the page edge.
//!
//! Whatever is still unresolved after these passes stays unresolved. The map
//! is partial rather than an error, and every consumer treats a missing column
//! as "no data".

use crate::config::StandardizeConfig;
use crate::error::{Error, Result};
use crate::geometry::{ColumnPosition, Page, TextractCell};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_REG_YEAR: Regex =
        Regex::new(r"(?i)^(?:REG(?:ISTRATION)?\.?\s*(?:YEAR|YR)?|YEAR)$").unwrap();
    static ref RE_APT_STAT: Regex = Regex::new(r"(?i)^APT\.?\s*(?:STAT(?:US)?)?$").unwrap();
    static ref RE_FILING_DATE: Regex = Regex::new(r"(?i)^FILING\s*(?:DATE)?$").unwrap();
    static ref RE_LEGAL_RENT: Regex =
        Regex::new(r"(?i)^LEGAL\s*(?:REG(?:ULATED)?\.?)?\s*RENT$").unwrap();
    static ref RE_PREF_RENT: Regex =
        Regex::new(r"(?i)^PREF(?:ER(?:ENTIAL)?)?\.?\s*RENT$").unwrap();
    static ref RE_PAID_RENT: Regex = Regex::new(r"(?i)^(?:ACTUAL\s*)?PAID\s*RENT$").unwrap();
    static ref RE_REASONS: Regex = Regex::new(r"(?i)^REASONS?\b").unwrap();
    static ref RE_LEASE_DATES: Regex = Regex::new(r"(?i)^LEASE\b").unwrap();

    /// Apartment status and filing date merged into one header cell
    static ref RE_APT_STAT_FILING_DATE: Regex =
        Regex::new(r"(?i)^APT\.?\s*STAT(?:US)?\s*FILING\s*(?:DATE)?$").unwrap();

    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Right edge of the page in width fractions.
const PAGE_RIGHT_EDGE: f32 = 1.0;

/// The logical columns of a rent registration table, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Registration year
    RegYear,
    /// Apartment status
    AptStat,
    /// Filing date
    FilingDate,
    /// Legal regulated rent
    LegalRent,
    /// Preferential rent
    PrefRent,
    /// Actual paid rent
    PaidRent,
    /// Reasons for differences or changes
    Reasons,
    /// Lease start and end dates
    LeaseDates,
}

impl Column {
    /// Number of logical columns.
    pub const COUNT: usize = 8;

    /// All columns in left-to-right order.
    pub const ALL: [Column; Column::COUNT] = [
        Column::RegYear,
        Column::AptStat,
        Column::FilingDate,
        Column::LegalRent,
        Column::PrefRent,
        Column::PaidRent,
        Column::Reasons,
        Column::LeaseDates,
    ];

    /// Position of the column in [`Column::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short name used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Column::RegYear => "reg_year",
            Column::AptStat => "apt_stat",
            Column::FilingDate => "filing_date",
            Column::LegalRent => "legal_rent",
            Column::PrefRent => "pref_rent",
            Column::PaidRent => "paid_rent",
            Column::Reasons => "reasons",
            Column::LeaseDates => "lease_dates",
        }
    }

    fn header_pattern(self) -> &'static Regex {
        match self {
            Column::RegYear => &RE_REG_YEAR,
            Column::AptStat => &RE_APT_STAT,
            Column::FilingDate => &RE_FILING_DATE,
            Column::LegalRent => &RE_LEGAL_RENT,
            Column::PrefRent => &RE_PREF_RENT,
            Column::PaidRent => &RE_PAID_RENT,
            Column::Reasons => &RE_REASONS,
            Column::LeaseDates => &RE_LEASE_DATES,
        }
    }

    /// Check whether header text names this column.
    ///
    /// # Examples
    ///
    /// ```
    /// use rh_standardize::layout::Column;
    ///
    /// assert!(Column::AptStat.matches_header("Apt Stat"));
    /// assert!(Column::AptStat.matches_header("APT"));
    /// assert!(!Column::AptStat.matches_header("Apt Stat Filing Date"));
    /// ```
    pub fn matches_header(self, text: &str) -> bool {
        self.header_pattern().is_match(&normalize_header(text))
    }
}

/// Boundaries of the resolved columns for one page.
///
/// Built once per page and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    positions: [Option<ColumnPosition>; Column::COUNT],
}

impl ColumnMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a map from explicit column boundaries.
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = (Column, ColumnPosition)>,
    {
        let mut map = Self::new();
        for (column, position) in positions {
            map.insert(column, position);
        }
        map
    }

    /// Boundary of `column`, if resolved.
    pub fn get(&self, column: Column) -> Option<&ColumnPosition> {
        self.positions[column.index()].as_ref()
    }

    fn insert(&mut self, column: Column, position: ColumnPosition) {
        self.positions[column.index()] = Some(position);
    }

    fn is_resolved(&self, column: Column) -> bool {
        self.positions[column.index()].is_some()
    }

    /// Number of resolved columns.
    pub fn resolved_count(&self) -> usize {
        self.positions.iter().filter(|p| p.is_some()).count()
    }

    /// True when every column is resolved.
    pub fn is_complete(&self) -> bool {
        self.resolved_count() == Column::COUNT
    }

    /// Resolved columns in left-to-right order.
    pub fn iter(&self) -> impl Iterator<Item = (Column, &ColumnPosition)> + '_ {
        Column::ALL
            .iter()
            .filter_map(move |&c| self.get(c).map(|p| (c, p)))
    }

    /// Columns that could not be resolved.
    pub fn missing(&self) -> Vec<Column> {
        Column::ALL
            .iter()
            .copied()
            .filter(|&c| !self.is_resolved(c))
            .collect()
    }
}

/// Resolve column boundaries from the first row of the page's first table.
///
/// # Errors
///
/// Returns [`Error::NoTables`] when the page has no tables and
/// [`Error::MissingHeaderRow`] when the first table has no non-empty first
/// row. An incomplete mapping is not an error.
pub fn resolve_columns(page: &Page, config: &StandardizeConfig) -> Result<ColumnMap> {
    let table = page.tables.first().ok_or(Error::NoTables)?;
    let header = table
        .rows
        .first()
        .filter(|row| !row.cells.is_empty())
        .ok_or(Error::MissingHeaderRow { table: 0 })?;
    Ok(resolve_header(&header.cells, config))
}

/// Resolve column boundaries from a header row's cells.
pub fn resolve_header(cells: &[TextractCell], config: &StandardizeConfig) -> ColumnMap {
    if cells.len() == Column::COUNT {
        log::debug!("Header has {} cells, mapping columns one to one", cells.len());
        return ColumnMap::from_positions(
            Column::ALL
                .iter()
                .copied()
                .zip(cells.iter().map(TextractCell::position)),
        );
    }

    log::debug!(
        "Header has {} cells (expected {}), resolving by pattern",
        cells.len(),
        Column::COUNT
    );

    let mut map = ColumnMap::new();
    let remainder = assign_by_pattern(cells, &mut map);
    split_merged_headers(&remainder, &mut map, config.merged_header_split_ratio);

    if config.synthesize_lease_column {
        synthesize_lease_column(&mut map);
    }

    if !map.is_complete() {
        log::warn!(
            "Partial column map: {} of {} resolved, missing {:?}",
            map.resolved_count(),
            Column::COUNT,
            map.missing().iter().map(|c| c.name()).collect::<Vec<_>>()
        );
    }

    map
}

/// Assign cells to the first unassigned column whose pattern matches.
///
/// Returns the cells no column pattern accepted.
fn assign_by_pattern<'a>(cells: &'a [TextractCell], map: &mut ColumnMap) -> Vec<&'a TextractCell> {
    let mut remainder = Vec::new();

    for cell in cells {
        let text = normalize_header(&cell.text);
        let column = Column::ALL
            .iter()
            .copied()
            .find(|&c| !map.is_resolved(c) && c.header_pattern().is_match(&text));

        match column {
            Some(column) => map.insert(column, cell.position()),
            None => remainder.push(cell),
        }
    }

    remainder
}

fn split_merged_headers(remainder: &[&TextractCell], map: &mut ColumnMap, ratio: f32) {
    for cell in remainder {
        let text = normalize_header(&cell.text);
        if !RE_APT_STAT_FILING_DATE.is_match(&text) {
            log::debug!("Header cell {:?} matches no column", text);
            continue;
        }
        if map.is_resolved(Column::AptStat) || map.is_resolved(Column::FilingDate) {
            log::debug!("Merged header {:?} ignored, a half is already resolved", text);
            continue;
        }
        let Some(reg_year) = map.get(Column::RegYear).copied() else {
            log::warn!("Cannot split merged header {:?} without a reg year column", text);
            continue;
        };

        let split = (cell.left + reg_year.width() * ratio).min(cell.right);
        map.insert(Column::AptStat, ColumnPosition::new(cell.left, split));
        map.insert(Column::FilingDate, ColumnPosition::new(split, cell.right));
        log::debug!(
            "Split merged header at {:.4} ({:.4}..{:.4})",
            split,
            cell.left,
            cell.right
        );
    }
}

fn synthesize_lease_column(map: &mut ColumnMap) {
    if map.is_resolved(Column::LeaseDates) {
        return;
    }
    if let Some(reasons) = map.get(Column::Reasons).copied() {
        if reasons.right < PAGE_RIGHT_EDGE {
            map.insert(
                Column::LeaseDates,
                ColumnPosition::new(reasons.right, PAGE_RIGHT_EDGE),
            );
            log::debug!("Synthesized lease dates column from {:.4}", reasons.right);
        }
    }
}

fn normalize_header(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{TextractRow, TextractTable};

    fn cell(text: &str, left: f32, right: f32) -> TextractCell {
        TextractCell::new(text, left, right)
    }

    fn full_header() -> Vec<TextractCell> {
        vec![
            cell("Reg Year", 0.05, 0.11),
            cell("Apt Stat", 0.11, 0.17),
            cell("Filing Date", 0.17, 0.26),
            cell("Legal Reg Rent", 0.26, 0.36),
            cell("Prefer. Rent", 0.36, 0.46),
            cell("Actual Paid Rent", 0.46, 0.56),
            cell("Reasons Differences/ Changes", 0.56, 0.78),
            cell("Lease Began/ Lease Ends", 0.78, 0.95),
        ]
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_exact_header_maps_in_order() {
        let cells = full_header();
        let map = resolve_header(&cells, &StandardizeConfig::default());
        assert!(map.is_complete());
        for (column, cell) in Column::ALL.iter().zip(cells.iter()) {
            assert_eq!(map.get(*column), Some(&cell.position()));
        }
    }

    #[test]
    fn test_exact_header_ignores_text() {
        let cells: Vec<TextractCell> = (0..8)
            .map(|i| cell("??", i as f32 * 0.1, i as f32 * 0.1 + 0.1))
            .collect();
        let map = resolve_header(&cells, &StandardizeConfig::default());
        assert!(map.is_complete());
        assert_eq!(map.get(Column::PaidRent).unwrap().left, 0.5);
    }

    #[test]
    fn test_pattern_pass_with_missing_lease_cell() {
        let mut cells = full_header();
        cells.pop();
        let config = StandardizeConfig::default().with_lease_column_synthesis(false);
        let map = resolve_header(&cells, &config);
        assert_eq!(map.resolved_count(), 7);
        assert_eq!(map.missing(), vec![Column::LeaseDates]);
        assert_eq!(map.get(Column::Reasons).unwrap().left, 0.56);
    }

    #[test]
    fn test_lease_column_synthesized() {
        let mut cells = full_header();
        cells.pop();
        let map = resolve_header(&cells, &StandardizeConfig::default());
        assert!(map.is_complete());
        let lease = map.get(Column::LeaseDates).unwrap();
        assert_eq!(lease.left, 0.78);
        assert_eq!(lease.right, 1.0);
    }

    #[test]
    fn test_merged_apt_stat_filing_date_split() {
        let cells = vec![
            cell("Reg Year", 0.05, 0.11),
            cell("Apt Stat Filing Date", 0.11, 0.26),
            cell("Legal Reg Rent", 0.26, 0.36),
            cell("Prefer. Rent", 0.36, 0.46),
            cell("Actual Paid Rent", 0.46, 0.56),
            cell("Reasons Differences/ Changes", 0.56, 0.78),
        ];
        let map = resolve_header(&cells, &StandardizeConfig::default());
        assert!(map.is_complete());

        let apt = map.get(Column::AptStat).unwrap();
        let filing = map.get(Column::FilingDate).unwrap();
        let expected_split = 0.11 + 0.06 * MERGED_RATIO;
        assert!(approx(apt.left, 0.11));
        assert!(approx(apt.right, expected_split));
        assert!(approx(filing.left, expected_split));
        assert!(approx(filing.right, 0.26));
    }

    const MERGED_RATIO: f32 = crate::config::MERGED_HEADER_SPLIT_RATIO;

    #[test]
    fn test_merged_header_uses_configured_ratio() {
        let cells = vec![
            cell("Reg Year", 0.0, 0.1),
            cell("APT STAT\nFILING DATE", 0.1, 0.3),
        ];
        let config = StandardizeConfig::default().with_merged_header_split_ratio(0.5);
        let map = resolve_header(&cells, &config);
        assert!(approx(map.get(Column::AptStat).unwrap().right, 0.15));
    }

    #[test]
    fn test_merged_header_split_clamped_to_cell() {
        let cells = vec![
            cell("Reg Year", 0.0, 0.3),
            cell("Apt Stat Filing Date", 0.3, 0.4),
        ];
        let map = resolve_header(&cells, &StandardizeConfig::default());
        assert!(approx(map.get(Column::AptStat).unwrap().right, 0.4));
        assert!(approx(map.get(Column::FilingDate).unwrap().left, 0.4));
    }

    #[test]
    fn test_merged_header_without_reg_year_not_split() {
        let cells = vec![
            cell("Apt Stat Filing Date", 0.11, 0.26),
            cell("Legal Reg Rent", 0.26, 0.36),
        ];
        let map = resolve_header(&cells, &StandardizeConfig::default());
        assert!(map.get(Column::AptStat).is_none());
        assert!(map.get(Column::FilingDate).is_none());
        assert!(map.get(Column::LegalRent).is_some());
    }

    #[test]
    fn test_unmatched_cells_leave_partial_map() {
        let cells = vec![cell("Reg Year", 0.05, 0.11), cell("Smudge", 0.11, 0.2)];
        let map = resolve_header(&cells, &StandardizeConfig::default());
        assert_eq!(map.resolved_count(), 1);
        assert!(!map.is_complete());
    }

    #[test]
    fn test_first_unassigned_column_wins() {
        // A second "Rent" cell that only matches an already used pattern is dropped
        let cells = vec![
            cell("Legal Rent", 0.2, 0.3),
            cell("Legal Rent", 0.3, 0.4),
        ];
        let map = resolve_header(&cells, &StandardizeConfig::default());
        assert_eq!(map.get(Column::LegalRent).unwrap().left, 0.2);
        assert_eq!(map.resolved_count(), 1);
    }

    #[test]
    fn test_header_patterns() {
        assert!(Column::RegYear.matches_header("REG YEAR"));
        assert!(Column::RegYear.matches_header("Reg"));
        assert!(Column::FilingDate.matches_header("Filing  Date"));
        assert!(Column::LegalRent.matches_header("LEGAL REG. RENT"));
        assert!(Column::PrefRent.matches_header("Prefer. Rent"));
        assert!(Column::PrefRent.matches_header("Preferential Rent"));
        assert!(Column::PaidRent.matches_header("Actual\nPaid Rent"));
        assert!(Column::Reasons.matches_header("Reasons Differences/ Changes"));
        assert!(Column::LeaseDates.matches_header("Lease Began/ Lease Ends"));
        assert!(!Column::LegalRent.matches_header("Prefer. Rent"));
    }

    #[test]
    fn test_resolve_columns_no_tables() {
        let page = Page::default();
        let err = resolve_columns(&page, &StandardizeConfig::default()).unwrap_err();
        assert!(matches!(err, Error::NoTables));
    }

    #[test]
    fn test_resolve_columns_empty_header() {
        let page = Page::new(vec![TextractTable::from_rows(vec![])], vec![]);
        let err = resolve_columns(&page, &StandardizeConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingHeaderRow { table: 0 }));

        let page = Page::new(
            vec![TextractTable::from_rows(vec![TextractRow::default()])],
            vec![],
        );
        assert!(resolve_columns(&page, &StandardizeConfig::default()).is_err());
    }

    #[test]
    fn test_resolve_columns_uses_first_table() {
        let first = TextractTable::from_rows(vec![TextractRow::from_cells(full_header())]);
        let second = TextractTable::from_rows(vec![TextractRow::from_cells(vec![cell(
            "Reg Year", 0.5, 0.6,
        )])]);
        let page = Page::new(vec![first, second], vec![]);
        let map = resolve_columns(&page, &StandardizeConfig::default()).unwrap();
        assert!(map.is_complete());
        assert_eq!(map.get(Column::RegYear).unwrap().left, 0.05);
    }

    #[test]
    fn test_column_map_iter_order() {
        let map = ColumnMap::from_positions(vec![
            (Column::Reasons, ColumnPosition::new(0.6, 0.7)),
            (Column::RegYear, ColumnPosition::new(0.0, 0.1)),
        ]);
        let columns: Vec<Column> = map.iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec![Column::RegYear, Column::Reasons]);
    }
}
