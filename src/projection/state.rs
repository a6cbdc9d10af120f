//! Carried state threaded through the year loop

use crate::client::ClientProfile;

/// Balances carried from one projected year into the next
///
/// The year loop is a fold: each year consumes the prior state and produces
/// the next, so no year can be revised after it is finalized and the
/// carryforward leaving year *i* is by construction the carryforward
/// entering year *i + 1*.
#[derive(Debug, Clone, Copy)]
pub struct CarriedState {
    /// Collateral value at the end of the prior year
    pub collateral: f64,
    /// QFAF subscription value at the end of the prior year
    pub qfaf: f64,
    /// NOL carryforward balance entering the next year
    pub nol_carryforward: f64,
}

impl CarriedState {
    /// State entering year 1
    pub fn opening(profile: &ClientProfile) -> Self {
        Self {
            collateral: profile.initial_collateral,
            qfaf: 0.0,
            nol_carryforward: profile.nol_carryforward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FilingStatus;

    #[test]
    fn test_opening_state_seeds_from_profile() {
        let profile = ClientProfile {
            filing_status: FilingStatus::Single,
            state_code: "TX".to_string(),
            state_tax_rate: 0.0,
            annual_income: 500_000.0,
            strategy_id: "Core 145/45".to_string(),
            initial_collateral: 2_000_000.0,
            st_loss_carryforward: 0.0,
            lt_loss_carryforward: 0.0,
            nol_carryforward: 150_000.0,
            qfaf_enabled: true,
            sizing_lag_years: 1,
        };
        let state = CarriedState::opening(&profile);

        assert_eq!(state.collateral, 2_000_000.0);
        assert_eq!(state.qfaf, 0.0);
        assert_eq!(state.nol_carryforward, 150_000.0);
    }
}
