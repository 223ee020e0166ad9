//! Per-field extractors for registration rows.
//!
//! Each extractor fills one group of fields on a [`CleanRow`] from the row's
//! lines and the page's column map. Extractors never fail: a missing line,
//! column or match leaves the field as it was. All of them except
//! [`extract_apt_status`] do nothing on a full-row status row.

use super::dates::normalize_date;
use super::patterns::{is_date, is_full_row_status, is_tenant_label, parse_rent};
use super::RowContext;
use crate::geometry::{join_words, ColumnPosition, Word};
use crate::layout::Column;
use crate::table::{CleanRow, RentKind};

/// Column holding the rent figure of `kind`.
pub fn rent_column(kind: RentKind) -> Column {
    match kind {
        RentKind::Legal => Column::LegalRent,
        RentKind::Preferential => Column::PrefRent,
        RentKind::Paid => Column::PaidRent,
    }
}

/// Apartment status, or the full-row status text.
///
/// The first line minus its year token is checked against the full-row
/// status pattern first; a match claims the whole row.
pub fn extract_apt_status(row: &mut CleanRow, ctx: &RowContext<'_>) {
    let Some(first) = ctx.first_line() else {
        return;
    };
    let rest = first.get(1..).unwrap_or(&[]);

    let text = join_words(rest);
    if is_full_row_status(&text) {
        log::debug!("Row {} has full-row status {:?}", row.reg_year(), text);
        row.apt_stat = Some(text);
        row.is_full_row_stat = true;
        return;
    }

    if let Some(status) = ctx.column_text(rest, Column::AptStat) {
        row.apt_stat = Some(status);
    }
}

/// Filing date from the first line, accepted only inside the filing column.
pub fn extract_filing_date(row: &mut CleanRow, ctx: &RowContext<'_>) {
    if row.is_full_row_stat {
        return;
    }
    let (Some(first), Some(column)) = (ctx.first_line(), ctx.column(Column::FilingDate)) else {
        return;
    };

    let filing = first
        .iter()
        .filter(|w| is_date(&w.text) && ctx.within(column, w))
        .find_map(|w| normalize_date(&w.text));
    if filing.is_some() {
        row.filing_date = filing;
    }
}

/// Legal, preferential and paid rent from the first line.
pub fn extract_rents(row: &mut CleanRow, ctx: &RowContext<'_>) {
    if row.is_full_row_stat {
        return;
    }
    let Some(first) = ctx.first_line() else {
        return;
    };

    for kind in RentKind::ALL {
        if let Some(rent) = ctx
            .column_text(first, rent_column(kind))
            .and_then(|text| parse_rent(&text))
        {
            row.set_rent(kind, rent);
        }
    }
}

/// Reasons text from every line of the row, one entry per line.
pub fn extract_reasons(row: &mut CleanRow, ctx: &RowContext<'_>) {
    if row.is_full_row_stat || ctx.column(Column::Reasons).is_none() {
        return;
    }
    row.reasons = ctx
        .lines
        .iter()
        .filter_map(|line| ctx.column_text(line, Column::Reasons))
        .collect();
}

/// Lease start: the last word of the first line, when it is a date.
///
/// A date sitting in the filing-date column is the filing date of a row
/// without lease dates, not a lease start.
pub fn extract_lease_start(row: &mut CleanRow, ctx: &RowContext<'_>) {
    if row.is_full_row_stat {
        return;
    }
    let Some(last) = ctx.first_line().and_then(|line| line.last()) else {
        return;
    };
    if ctx
        .column(Column::FilingDate)
        .is_some_and(|filing| ctx.within(filing, last))
    {
        return;
    }
    if let Some(date) = normalize_date(&last.text) {
        row.lease_start = Some(date);
    }
}

/// Lease end: the last word of the second line, when it is a date.
///
/// A second line that opens a repeated-year record carries that record's
/// lease start, so it is not read.
pub fn extract_lease_end(row: &mut CleanRow, ctx: &RowContext<'_>) {
    if row.is_full_row_stat {
        return;
    }
    if let Some(date) = ctx
        .second_line()
        .and_then(|line| line.last())
        .and_then(|last| normalize_date(&last.text))
    {
        row.lease_end = Some(date);
    }
}

/// Candidate tenant text from every continuation line.
///
/// Lines opening a repeated-year record are skipped. Dates and the "TENANT" label are dropped. With
/// `restrict_tenants_to_columns` set, only words between the
/// apartment-status and paid-rent columns are kept.
pub fn extract_tenants(row: &mut CleanRow, ctx: &RowContext<'_>) {
    if row.is_full_row_stat {
        return;
    }
    let span = tenant_span(ctx);

    row.tenants = ctx
        .continuation_lines()
        .map(|line| {
            join_words(line.iter().filter(|w| {
                !is_date(&w.text)
                    && !is_tenant_label(&w.text)
                    && span.as_ref().is_none_or(|s| ctx.within(s, w))
            }))
        })
        .filter(|text| !text.is_empty())
        .collect();
}

fn tenant_span(ctx: &RowContext<'_>) -> Option<ColumnPosition> {
    if !ctx.config.restrict_tenants_to_columns {
        return None;
    }
    match (ctx.column(Column::AptStat), ctx.column(Column::PaidRent)) {
        (Some(apt), Some(paid)) => Some(apt.span(paid)),
        _ => None,
    }
}

impl RowContext<'_> {
    /// Joined text of the words of `line` inside `column`, if any.
    pub fn column_text(&self, line: &[Word], column: Column) -> Option<String> {
        let position = self.column(column)?;
        let text = join_words(line.iter().filter(|w| self.within(position, w)));
        (!text.is_empty()).then_some(text)
    }
}
