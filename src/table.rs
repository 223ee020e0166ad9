//! Standardized registration records.
//!
//! A [`CleanRow`] is created by the row segmenter for each registration year
//! and filled in by the field extractors. Every value field is nullable:
//! `None` means the value could not be recovered from the page, not zero.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The three rent figures recorded per registration year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RentKind {
    /// Legal regulated rent
    Legal,
    /// Preferential rent
    Preferential,
    /// Actual paid rent
    Paid,
}

impl RentKind {
    /// All rent kinds, in column order.
    pub const ALL: [RentKind; 3] = [RentKind::Legal, RentKind::Preferential, RentKind::Paid];
}

/// A parsed rent cell: the numeric amount and the text marker are kept apart.
///
/// `marker` holds the `W` suffix flag when it follows an amount, or a
/// non-numeric marker such as `EXEMPT` or `AMT MISS` in place of one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RentAmount {
    /// Numeric amount, if the cell held one
    pub amount: Option<f64>,
    /// Suffix flag or non-numeric marker text
    pub marker: Option<String>,
}

/// One year-by-year registration record recovered from a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanRow {
    reg_year: String,
    /// Apartment status code, or the full-row status text
    pub apt_stat: Option<String>,
    /// Filing date as `YYYY-MM-DD`
    pub filing_date: Option<String>,
    /// Legal regulated rent
    pub legal_rent: Option<f64>,
    /// Marker text found in the legal rent cell
    pub legal_rent_marker: Option<String>,
    /// Preferential rent
    pub pref_rent: Option<f64>,
    /// Marker text found in the preferential rent cell
    pub pref_rent_marker: Option<String>,
    /// Actual paid rent
    pub paid_rent: Option<f64>,
    /// Marker text found in the paid rent cell
    pub paid_rent_marker: Option<String>,
    /// Reasons-for-change text, one entry per line that carried any
    pub reasons: Vec<String>,
    /// Lease start as `YYYY-MM-DD`
    pub lease_start: Option<String>,
    /// Lease end as `YYYY-MM-DD`
    pub lease_end: Option<String>,
    /// Candidate tenant text spans, one per continuation line
    pub tenants: Vec<String>,
    /// The status text spans the whole row; no other field is extracted
    #[serde(rename = "_isFullRowStat")]
    pub is_full_row_stat: bool,
    /// Indices into the page's lines that make up this row
    #[serde(rename = "_lineIndexes")]
    pub line_indexes: Vec<usize>,
    /// Reserved review hook; nothing in the engine sets it
    #[serde(rename = "_flagForReview")]
    pub flag_for_review: bool,
}

impl CleanRow {
    /// Create an empty row for `reg_year` whose first line is `first_line`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rh_standardize::table::CleanRow;
    ///
    /// let row = CleanRow::new("1991", 7);
    /// assert_eq!(row.reg_year(), "1991");
    /// assert_eq!(row.line_indexes, vec![7]);
    /// assert!(row.apt_stat.is_none());
    /// assert!(!row.is_full_row_stat);
    /// ```
    pub fn new(reg_year: impl Into<String>, first_line: usize) -> Self {
        Self {
            reg_year: reg_year.into(),
            apt_stat: None,
            filing_date: None,
            legal_rent: None,
            legal_rent_marker: None,
            pref_rent: None,
            pref_rent_marker: None,
            paid_rent: None,
            paid_rent_marker: None,
            reasons: Vec::new(),
            lease_start: None,
            lease_end: None,
            tenants: Vec::new(),
            is_full_row_stat: false,
            line_indexes: vec![first_line],
            flag_for_review: false,
        }
    }

    /// Registration year this row was created for.
    pub fn reg_year(&self) -> &str {
        &self.reg_year
    }

    /// Rent amount stored for `kind`.
    pub fn rent(&self, kind: RentKind) -> Option<f64> {
        match kind {
            RentKind::Legal => self.legal_rent,
            RentKind::Preferential => self.pref_rent,
            RentKind::Paid => self.paid_rent,
        }
    }

    /// Rent marker stored for `kind`.
    pub fn rent_marker(&self, kind: RentKind) -> Option<&str> {
        match kind {
            RentKind::Legal => self.legal_rent_marker.as_deref(),
            RentKind::Preferential => self.pref_rent_marker.as_deref(),
            RentKind::Paid => self.paid_rent_marker.as_deref(),
        }
    }

    /// Store a parsed rent cell for `kind`.
    pub fn set_rent(&mut self, kind: RentKind, rent: RentAmount) {
        let (amount, marker) = match kind {
            RentKind::Legal => (&mut self.legal_rent, &mut self.legal_rent_marker),
            RentKind::Preferential => (&mut self.pref_rent, &mut self.pref_rent_marker),
            RentKind::Paid => (&mut self.paid_rent, &mut self.paid_rent_marker),
        };
        *amount = rent.amount;
        *marker = rent.marker;
    }

    /// Number of value fields, besides the year, that hold data.
    ///
    /// List fields count as populated when non-empty.
    pub fn populated_value_fields(&self) -> usize {
        let scalars = [
            self.apt_stat.is_some(),
            self.filing_date.is_some(),
            self.legal_rent.is_some() || self.legal_rent_marker.is_some(),
            self.pref_rent.is_some() || self.pref_rent_marker.is_some(),
            self.paid_rent.is_some() || self.paid_rent_marker.is_some(),
            !self.reasons.is_empty(),
            self.lease_start.is_some(),
            self.lease_end.is_some(),
            !self.tenants.is_empty(),
        ];
        scalars.iter().filter(|&&set| set).count()
    }

    /// True when no value field other than `apt_stat` holds data.
    pub fn has_only_status(&self) -> bool {
        let status = usize::from(self.apt_stat.is_some());
        self.populated_value_fields() == status
    }
}

/// Number of value fields counted by [`CleanRow::populated_value_fields`].
pub const VALUE_FIELD_COUNT: usize = 9;

/// Ordered standardized records for one page, in document order.
pub type CleanTable = Vec<CleanRow>;

/// Encode a table as pretty-printed JSON for the persistence layer.
pub fn clean_table_to_json(table: &CleanTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_is_empty() {
        let row = CleanRow::new("1984", 3);
        assert_eq!(row.populated_value_fields(), 0);
        assert!(row.has_only_status());
        assert!(row.reasons.is_empty());
        assert!(row.tenants.is_empty());
        assert!(!row.flag_for_review);
    }

    #[test]
    fn test_set_rent_per_kind() {
        let mut row = CleanRow::new("1992", 0);
        row.set_rent(
            RentKind::Legal,
            RentAmount {
                amount: Some(405.59),
                marker: None,
            },
        );
        row.set_rent(
            RentKind::Paid,
            RentAmount {
                amount: None,
                marker: Some("EXEMPT".to_string()),
            },
        );
        assert_eq!(row.rent(RentKind::Legal), Some(405.59));
        assert_eq!(row.rent(RentKind::Preferential), None);
        assert_eq!(row.rent(RentKind::Paid), None);
        assert_eq!(row.rent_marker(RentKind::Paid), Some("EXEMPT"));
        assert_eq!(row.populated_value_fields(), 2);
    }

    #[test]
    fn test_has_only_status() {
        let mut row = CleanRow::new("2001", 0);
        row.apt_stat = Some("REG NOT FOUND".to_string());
        assert!(row.has_only_status());
        row.reasons.push("VAC/LEAS".to_string());
        assert!(!row.has_only_status());
    }

    #[test]
    fn test_serialized_field_names() {
        let mut row = CleanRow::new("1991", 12);
        row.legal_rent = Some(380.84);
        row.filing_date = Some("1991-09-05".to_string());
        let value = serde_json::to_value(&row).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "regYear",
            "aptStat",
            "filingDate",
            "legalRent",
            "prefRent",
            "paidRent",
            "reasons",
            "leaseStart",
            "leaseEnd",
            "tenants",
            "_isFullRowStat",
            "_lineIndexes",
            "_flagForReview",
        ] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert_eq!(obj["regYear"], "1991");
        assert_eq!(obj["legalRent"], serde_json::json!(380.84));
        assert!(obj["prefRent"].is_null());
        assert_eq!(obj["_lineIndexes"], serde_json::json!([12]));
    }

    #[test]
    fn test_table_json_round_trip() {
        let table: CleanTable = vec![CleanRow::new("1991", 1), CleanRow::new("1992", 2)];
        let json = clean_table_to_json(&table).unwrap();
        let decoded: CleanTable = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, table);
    }
}
