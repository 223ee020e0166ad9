//! Token patterns recognized inside registration rows.

use crate::table::RentAmount;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `MM/DD/YYYY` date token
    pub(crate) static ref RE_DATE: Regex = Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap();

    /// Rent cell: an amount with an optional `W` flag, or a non-numeric marker
    static ref RE_RENT: Regex = Regex::new(
        r"^(?:(?P<amount>\d[\d,]*\.\d{2})\s*(?P<flag>W)?|(?P<marker>EXEMPT|AMT\s+MISS))"
    )
    .unwrap();

    /// Status text that stands in for a whole row
    static ref RE_FULL_ROW_STATUS: Regex =
        Regex::new(r"(?i)\bREG(?:ISTRATION)?\.?\s+NOT\s+(?:FOUND|REQUIRED)\b").unwrap();

    /// "TENANT" label with at most one trailing character ("TENANT:")
    static ref RE_TENANT_LABEL: Regex = Regex::new(r"^TENANT.?$").unwrap();
}

/// Check whether a token is a `MM/DD/YYYY` date (calendar validity aside).
pub fn is_date(text: &str) -> bool {
    RE_DATE.is_match(text.trim())
}

/// Check whether status text spans the whole row.
///
/// # Examples
///
/// ```
/// use rh_standardize::extractors::patterns::is_full_row_status;
///
/// assert!(is_full_row_status("REG NOT FOUND FOR SUBJECT PREMISES"));
/// assert!(is_full_row_status("Registration not required"));
/// assert!(!is_full_row_status("RS"));
/// ```
pub fn is_full_row_status(text: &str) -> bool {
    RE_FULL_ROW_STATUS.is_match(text)
}

/// Check whether a token is the tenant label.
pub fn is_tenant_label(text: &str) -> bool {
    RE_TENANT_LABEL.is_match(text.trim())
}

/// Parse the joined text of one rent cell.
///
/// Returns `None` when the text holds neither an amount nor a known marker.
///
/// # Examples
///
/// ```
/// use rh_standardize::extractors::patterns::parse_rent;
///
/// let rent = parse_rent("1,045.20 W").unwrap();
/// assert_eq!(rent.amount, Some(1045.20));
/// assert_eq!(rent.marker.as_deref(), Some("W"));
///
/// let exempt = parse_rent("EXEMPT").unwrap();
/// assert_eq!(exempt.amount, None);
/// assert_eq!(exempt.marker.as_deref(), Some("EXEMPT"));
///
/// assert!(parse_rent("VAC/LEAS").is_none());
/// ```
pub fn parse_rent(text: &str) -> Option<RentAmount> {
    let caps = RE_RENT.captures(text.trim())?;

    if let Some(amount) = caps.name("amount") {
        let amount = amount.as_str().replace(',', "").parse::<f64>().ok();
        let marker = caps.name("flag").map(|m| m.as_str().to_string());
        return Some(RentAmount { amount, marker });
    }

    caps.name("marker").map(|m| RentAmount {
        amount: None,
        marker: Some(m.as_str().to_string()),
    })
}
