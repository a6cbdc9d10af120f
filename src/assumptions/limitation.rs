//! Statutory loss-limitation tables
//!
//! Covers the §461(l) excess-business-loss cap by filing status and the NOL
//! usable-percentage constant.

use crate::client::FilingStatus;

/// Fraction of a year's remaining taxable income that NOL carryforward can
/// absorb. Fixed by statute, not filing-status-dependent.
pub const NOL_USABLE_FRACTION: f64 = 0.80;

/// §461(l) ordinary-loss deduction caps for the projection base year
#[derive(Debug, Clone)]
pub struct LimitationTable {
    /// Tax year the limits are indexed for
    pub base_year: i32,
    single: f64,
    married_filing_jointly: f64,
    married_filing_separately: f64,
    head_of_household: f64,
}

impl Default for LimitationTable {
    fn default() -> Self {
        // Inflation-indexed excess-business-loss limits for the base year.
        // Joint filers get double the single amount; all other statuses use
        // the single amount.
        Self {
            base_year: 2025,
            single: 256_000.0,
            married_filing_jointly: 512_000.0,
            married_filing_separately: 256_000.0,
            head_of_household: 256_000.0,
        }
    }
}

impl LimitationTable {
    /// Create from explicit limits for another base year
    pub fn from_limits(base_year: i32, single: f64, married_filing_jointly: f64) -> Self {
        // Separate and head-of-household filers track the single amount
        Self {
            base_year,
            single,
            married_filing_jointly,
            married_filing_separately: single,
            head_of_household: single,
        }
    }

    /// Get the ordinary-loss deduction cap for a filing status
    pub fn limit_for(&self, status: FilingStatus) -> f64 {
        match status {
            FilingStatus::Single => self.single,
            FilingStatus::MarriedFilingJointly => self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => self.married_filing_separately,
            FilingStatus::HeadOfHousehold => self.head_of_household,
        }
    }

    /// Get the cap for a raw UI selector string
    ///
    /// Unknown selectors degrade to the single-filer limit (the most
    /// conservative cap) rather than failing, so a bad dropdown value still
    /// renders a projection.
    pub fn limit_for_selector(&self, selector: &str) -> f64 {
        self.limit_for(FilingStatus::parse(selector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_by_status() {
        let table = LimitationTable::default();

        assert_eq!(table.limit_for(FilingStatus::Single), 256_000.0);
        assert_eq!(table.limit_for(FilingStatus::MarriedFilingJointly), 512_000.0);
        assert_eq!(table.limit_for(FilingStatus::MarriedFilingSeparately), 256_000.0);
        assert_eq!(table.limit_for(FilingStatus::HeadOfHousehold), 256_000.0);
    }

    #[test]
    fn test_selector_fallback() {
        let table = LimitationTable::default();

        assert_eq!(table.limit_for_selector("mfj"), 512_000.0);
        // Unknown selector falls back to the single-filer cap
        assert_eq!(table.limit_for_selector("widowed"), 256_000.0);
        assert_eq!(table.limit_for_selector(""), 256_000.0);
    }

    #[test]
    fn test_custom_base_year() {
        let table = LimitationTable::from_limits(2024, 305_000.0, 610_000.0);

        assert_eq!(table.base_year, 2024);
        assert_eq!(table.limit_for(FilingStatus::HeadOfHousehold), 305_000.0);
        assert_eq!(table.limit_for(FilingStatus::MarriedFilingJointly), 610_000.0);
    }

    #[test]
    fn test_nol_fraction_constant() {
        // Statutory 80%-of-taxable-income ceiling on NOL usage
        assert_eq!(NOL_USABLE_FRACTION, 0.80);
    }
}
