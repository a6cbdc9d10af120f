//! Economic and statutory assumption sets for projections

pub mod limitation;
pub mod strategy;

pub use limitation::{LimitationTable, NOL_USABLE_FRACTION};
pub use strategy::{LossRateSchedule, StrategyCatalog};

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Market, fee, and tax-rate assumptions
///
/// One value per run, passed explicitly into the engine so concurrent runs
/// with different assumption sets (e.g. sensitivity sweeps) cannot cross-talk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAssumptions {
    /// Annual collateral growth rate (0.07 = 7%)
    #[serde(default = "default_growth_rate")]
    pub collateral_growth_rate: f64,

    /// QFAF year-1 subscription as a fraction of initial collateral
    #[serde(default = "default_qfaf_year1_multiplier")]
    pub qfaf_year1_multiplier: f64,

    /// Year-over-year QFAF subscription decay factor (< 1.0)
    #[serde(default = "default_qfaf_decay")]
    pub qfaf_decay: f64,

    /// Ordinary losses generated per dollar of QFAF subscription
    #[serde(default = "default_loss_multiplier")]
    pub loss_multiplier: f64,

    /// Advisor/management fee as a fraction of collateral value
    #[serde(default = "default_advisor_fee_rate")]
    pub advisor_fee_rate: f64,

    /// Financing fee as a fraction of collateral value
    #[serde(default = "default_financing_fee_rate")]
    pub financing_fee_rate: f64,

    /// Expected QFAF excess return (informational, non-tax)
    #[serde(default = "default_qfaf_alpha_rate")]
    pub qfaf_alpha_rate: f64,

    /// Expected collateral excess return (informational, non-tax)
    #[serde(default = "default_collateral_alpha_rate")]
    pub collateral_alpha_rate: f64,

    /// Federal marginal ordinary-income rate applied to deductions
    #[serde(default = "default_federal_marginal_rate")]
    pub federal_marginal_rate: f64,
}

fn default_growth_rate() -> f64 { 0.07 }
fn default_qfaf_year1_multiplier() -> f64 { 0.90 }
fn default_qfaf_decay() -> f64 { 0.85 }
fn default_loss_multiplier() -> f64 { 1.5 }
fn default_advisor_fee_rate() -> f64 { 0.0100 }
fn default_financing_fee_rate() -> f64 { 0.0075 }
fn default_qfaf_alpha_rate() -> f64 { 0.02 }
fn default_collateral_alpha_rate() -> f64 { 0.01 }
fn default_federal_marginal_rate() -> f64 { 0.37 }

impl Default for MarketAssumptions {
    fn default() -> Self {
        Self {
            collateral_growth_rate: 0.07,
            qfaf_year1_multiplier: 0.90,
            qfaf_decay: 0.85,
            loss_multiplier: 1.5,
            advisor_fee_rate: 0.0100,
            financing_fee_rate: 0.0075,
            qfaf_alpha_rate: 0.02,
            collateral_alpha_rate: 0.01,
            federal_marginal_rate: 0.37,
        }
    }
}

impl MarketAssumptions {
    /// Validate rate ranges, rejecting malformed assumption sets
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.collateral_growth_rate <= -1.0 {
            return Err(ProjectionError::InvalidAssumption {
                field: "collateral_growth_rate",
                value: self.collateral_growth_rate,
            });
        }
        if self.qfaf_year1_multiplier <= 0.0 {
            return Err(ProjectionError::InvalidAssumption {
                field: "qfaf_year1_multiplier",
                value: self.qfaf_year1_multiplier,
            });
        }
        if self.qfaf_decay <= 0.0 || self.qfaf_decay > 1.0 {
            return Err(ProjectionError::InvalidAssumption {
                field: "qfaf_decay",
                value: self.qfaf_decay,
            });
        }
        if self.loss_multiplier <= 0.0 {
            return Err(ProjectionError::InvalidAssumption {
                field: "loss_multiplier",
                value: self.loss_multiplier,
            });
        }
        if self.advisor_fee_rate < 0.0 {
            return Err(ProjectionError::InvalidAssumption {
                field: "advisor_fee_rate",
                value: self.advisor_fee_rate,
            });
        }
        if self.financing_fee_rate < 0.0 {
            return Err(ProjectionError::InvalidAssumption {
                field: "financing_fee_rate",
                value: self.financing_fee_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.federal_marginal_rate) {
            return Err(ProjectionError::InvalidAssumption {
                field: "federal_marginal_rate",
                value: self.federal_marginal_rate,
            });
        }
        Ok(())
    }
}

/// Combined assumption set
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub market: MarketAssumptions,
    pub limits: LimitationTable,
    pub strategies: StrategyCatalog,
}

impl Assumptions {
    /// Standard advisory assumption set
    pub fn default_advisory() -> Self {
        Self {
            market: MarketAssumptions::default(),
            limits: LimitationTable::default(),
            strategies: StrategyCatalog::default_advisory(),
        }
    }

    /// Validate the full assumption set
    pub fn validate(&self) -> Result<(), ProjectionError> {
        self.market.validate()
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_advisory()
    }
}
