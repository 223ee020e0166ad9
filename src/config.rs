//! Configuration for rent-history standardization.
//!
//! The layout heuristics depend on a few empirically chosen constants. They
//! live here as named values so they can be tuned and tested on their own.

use crate::error::{Error, Result};

/// Default slack, as a fraction of page width, added to both sides of a
/// column when deciding whether a word falls inside it.
pub const DEFAULT_COLUMN_TOLERANCE: f32 = 0.015;

/// Width of the apartment-status half of a merged "Apt Stat / Filing Date"
/// header, relative to the registration-year column's width.
pub const MERGED_HEADER_SPLIT_RATIO: f32 = 0.93;

/// Largest tolerance accepted by [`StandardizeConfig::validate`].
pub const MAX_COLUMN_TOLERANCE: f32 = 0.1;

/// Standardization configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizeConfig {
    /// Slack added around column boundaries for the "within" check.
    pub column_tolerance: f32,

    /// Split ratio applied to merged apartment-status/filing-date headers.
    pub merged_header_split_ratio: f32,

    /// Only keep tenant words between the apartment-status and paid-rent
    /// columns (when both are resolved).
    pub restrict_tenants_to_columns: bool,

    /// Derive a lease-dates column from the reasons column when the header
    /// row has none.
    pub synthesize_lease_column: bool,
}

impl Default for StandardizeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardizeConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            column_tolerance: DEFAULT_COLUMN_TOLERANCE,
            merged_header_split_ratio: MERGED_HEADER_SPLIT_RATIO,
            restrict_tenants_to_columns: true,
            synthesize_lease_column: true,
        }
    }

    /// Set the column tolerance.
    pub fn with_column_tolerance(mut self, tolerance: f32) -> Self {
        self.column_tolerance = tolerance;
        self
    }

    /// Set the merged-header split ratio.
    pub fn with_merged_header_split_ratio(mut self, ratio: f32) -> Self {
        self.merged_header_split_ratio = ratio;
        self
    }

    /// Restrict tenant words to the apartment-status..paid-rent span.
    pub fn with_tenant_column_restriction(mut self, enable: bool) -> Self {
        self.restrict_tenants_to_columns = enable;
        self
    }

    /// Enable lease-dates column synthesis.
    pub fn with_lease_column_synthesis(mut self, enable: bool) -> Self {
        self.synthesize_lease_column = enable;
        self
    }

    /// Check that every value is inside its usable range.
    ///
    /// # Examples
    ///
    /// ```
    /// use rh_standardize::config::StandardizeConfig;
    ///
    /// assert!(StandardizeConfig::default().validate().is_ok());
    /// assert!(StandardizeConfig::default().with_column_tolerance(-0.01).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=MAX_COLUMN_TOLERANCE).contains(&self.column_tolerance) {
            return Err(Error::InvalidConfig(format!(
                "column_tolerance must be in [0, {}], got {}",
                MAX_COLUMN_TOLERANCE, self.column_tolerance
            )));
        }
        if !(self.merged_header_split_ratio > 0.0 && self.merged_header_split_ratio.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "merged_header_split_ratio must be positive, got {}",
                self.merged_header_split_ratio
            )));
        }
        Ok(())
    }
}
