//! Client profile and per-year override data structures

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Federal filing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
}

impl Default for FilingStatus {
    fn default() -> Self {
        Self::Single
    }
}

impl FilingStatus {
    /// Parse a UI selector string
    ///
    /// Accepts the common short and long selector codes. Anything
    /// unrecognized degrades to `Single`, the most conservative limitation
    /// bracket, so a stale dropdown value never blocks a projection.
    pub fn parse(selector: &str) -> Self {
        match selector.trim().to_ascii_lowercase().as_str() {
            "single" | "s" => Self::Single,
            "mfj" | "married_filing_jointly" | "married-filing-jointly" | "joint" => {
                Self::MarriedFilingJointly
            }
            "mfs" | "married_filing_separately" | "married-filing-separately" | "separate" => {
                Self::MarriedFilingSeparately
            }
            "hoh" | "head_of_household" | "head-of-household" => Self::HeadOfHousehold,
            _ => Self::Single,
        }
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilingStatus::Single => write!(f, "Single"),
            FilingStatus::MarriedFilingJointly => write!(f, "Married Filing Jointly"),
            FilingStatus::MarriedFilingSeparately => write!(f, "Married Filing Separately"),
            FilingStatus::HeadOfHousehold => write!(f, "Head of Household"),
        }
    }
}

/// Client inputs for one projection run
///
/// Immutable per run; the engine never mutates a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Federal filing status
    #[serde(default)]
    pub filing_status: FilingStatus,

    /// Two-letter state code (display only)
    #[serde(default)]
    pub state_code: String,

    /// State marginal ordinary-income rate (0.093 = 9.3%)
    #[serde(default)]
    pub state_tax_rate: f64,

    /// Baseline annual ordinary income, used for any year without an override
    pub annual_income: f64,

    /// Collateral strategy identifier (must exist in the catalog)
    pub strategy_id: String,

    /// Initial collateral investment
    pub initial_collateral: f64,

    /// Pre-existing short-term capital loss carryforward
    #[serde(default)]
    pub st_loss_carryforward: f64,

    /// Pre-existing long-term capital loss carryforward
    #[serde(default)]
    pub lt_loss_carryforward: f64,

    /// Pre-existing NOL carryforward entering year 1
    #[serde(default)]
    pub nol_carryforward: f64,

    /// Whether the QFAF overlay is subscribed
    #[serde(default = "default_qfaf_enabled")]
    pub qfaf_enabled: bool,

    /// Years before QFAF sizing responds to a collateral change
    #[serde(default = "default_sizing_lag_years")]
    pub sizing_lag_years: u32,
}

fn default_qfaf_enabled() -> bool { true }
fn default_sizing_lag_years() -> u32 { 1 }

impl ClientProfile {
    /// Validate balances and rates, rejecting malformed profiles
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.annual_income < 0.0 {
            return Err(ProjectionError::InvalidProfile {
                field: "annual_income",
                value: self.annual_income,
            });
        }
        if self.initial_collateral < 0.0 {
            return Err(ProjectionError::InvalidProfile {
                field: "initial_collateral",
                value: self.initial_collateral,
            });
        }
        if self.st_loss_carryforward < 0.0 {
            return Err(ProjectionError::InvalidProfile {
                field: "st_loss_carryforward",
                value: self.st_loss_carryforward,
            });
        }
        if self.lt_loss_carryforward < 0.0 {
            return Err(ProjectionError::InvalidProfile {
                field: "lt_loss_carryforward",
                value: self.lt_loss_carryforward,
            });
        }
        if self.nol_carryforward < 0.0 {
            return Err(ProjectionError::InvalidProfile {
                field: "nol_carryforward",
                value: self.nol_carryforward,
            });
        }
        if !(0.0..=1.0).contains(&self.state_tax_rate) {
            return Err(ProjectionError::InvalidProfile {
                field: "state_tax_rate",
                value: self.state_tax_rate,
            });
        }
        Ok(())
    }

    /// Combined marginal ordinary-income rate for this client
    pub fn marginal_rate(&self, federal_marginal_rate: f64) -> f64 {
        federal_marginal_rate + self.state_tax_rate
    }
}

/// A sparse per-year override supplied by the advisor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearOverride {
    /// 1-based projection year this override applies to
    pub year: u32,

    /// Substitute ordinary income for the year; None keeps the baseline
    #[serde(default)]
    pub income: Option<f64>,

    /// Cash infusion for the year; negative values are withdrawals
    #[serde(default)]
    pub cash_infusion: f64,

    /// Free-text annotation, display only
    #[serde(default)]
    pub note: Option<String>,
}

impl YearOverride {
    /// An override that changes nothing for its year
    pub fn passthrough(year: u32) -> Self {
        Self {
            year,
            income: None,
            cash_infusion: 0.0,
            note: None,
        }
    }

    /// Whether this override leaves the year at its defaults
    pub fn is_default(&self) -> bool {
        self.income.is_none() && self.cash_infusion == 0.0
    }
}
