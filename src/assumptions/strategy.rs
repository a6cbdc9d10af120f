//! Collateral strategy catalog with per-year ST loss-generation rates

use std::collections::HashMap;

use crate::error::ProjectionError;

/// Short-term loss-generation schedule by projection year (1-indexed)
///
/// Rates decay over time: the easy losses come out of a fresh portfolio in
/// the first years, after which harvesting settles to a steady-state rate.
#[derive(Debug, Clone)]
pub struct LossRateSchedule {
    /// ST loss rates (fraction of collateral value) by projection year
    rates: Vec<f64>,
}

impl LossRateSchedule {
    /// Create from explicit per-year rates
    pub fn from_rates(rates: &[f64]) -> Self {
        Self {
            rates: rates.to_vec(),
        }
    }

    /// Get the ST loss-generation rate for a given projection year
    ///
    /// Years beyond the defined schedule repeat the last defined rate
    /// (flat continuation, no extrapolation).
    pub fn rate_for(&self, year: u32) -> f64 {
        if year == 0 {
            return self.rates.first().copied().unwrap_or(0.0);
        }
        let idx = (year as usize).saturating_sub(1);
        self.rates
            .get(idx)
            .copied()
            .unwrap_or_else(|| self.rates.last().copied().unwrap_or(0.0))
    }

    /// Number of years with explicitly defined rates
    pub fn defined_years(&self) -> u32 {
        self.rates.len() as u32
    }
}

/// Named catalog of collateral strategies
///
/// Keys are the strategy identifiers shown to advisors (e.g. "Core 145/45").
/// The leverage in the name drives the loss-rate level: more extension means
/// more turnover and more harvestable short-term losses per dollar of
/// collateral.
#[derive(Debug, Clone)]
pub struct StrategyCatalog {
    strategies: HashMap<String, LossRateSchedule>,
}

impl StrategyCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Standard advisory catalog
    pub fn default_advisory() -> Self {
        let mut catalog = Self::new();

        // Cash-funded core strategies
        catalog.insert(
            "Core 145/45",
            LossRateSchedule::from_rates(&[
                0.140, // Year 1
                0.110, // Year 2
                0.090, // Year 3
                0.075, // Year 4
                0.065, // Year 5
                0.060, // Year 6+
            ]),
        );
        catalog.insert(
            "Core 175/75",
            LossRateSchedule::from_rates(&[
                0.190, // Year 1
                0.150, // Year 2
                0.120, // Year 3
                0.100, // Year 4
                0.090, // Year 5
                0.085, // Year 6+
            ]),
        );

        // Overlay strategies on appreciated holdings
        catalog.insert(
            "Overlay 250/150",
            LossRateSchedule::from_rates(&[
                0.260, // Year 1
                0.210, // Year 2
                0.170, // Year 3
                0.145, // Year 4
                0.130, // Year 5
                0.120, // Year 6+
            ]),
        );
        catalog.insert(
            "Overlay 350/250",
            LossRateSchedule::from_rates(&[
                0.340, // Year 1
                0.280, // Year 2
                0.230, // Year 3
                0.200, // Year 4
                0.180, // Year 5
                0.170, // Year 6+
            ]),
        );

        catalog
    }

    /// Add or replace a strategy schedule
    pub fn insert(&mut self, id: &str, schedule: LossRateSchedule) {
        self.strategies.insert(id.to_string(), schedule);
    }

    /// Look up a strategy schedule by identifier
    pub fn schedule(&self, id: &str) -> Result<&LossRateSchedule, ProjectionError> {
        self.strategies
            .get(id)
            .ok_or_else(|| ProjectionError::UnknownStrategy(id.to_string()))
    }

    /// Get the ST loss-generation rate for a strategy and projection year
    pub fn rate_for(&self, id: &str, year: u32) -> Result<f64, ProjectionError> {
        Ok(self.schedule(id)?.rate_for(year))
    }

    /// Check whether a strategy identifier exists
    pub fn contains(&self, id: &str) -> bool {
        self.strategies.contains_key(id)
    }

    /// Strategy identifiers in the catalog, sorted for stable display
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for StrategyCatalog {
    fn default() -> Self {
        Self::default_advisory()
    }
}
