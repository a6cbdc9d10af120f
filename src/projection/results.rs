//! Per-year projection rows and the cumulative summary

use serde::Serialize;

/// One projected year, emitted by the engine and never mutated afterwards
#[derive(Debug, Clone, Serialize)]
pub struct YearResult {
    /// 1-based projection year
    pub year: u32,
    /// Calendar year this row represents
    pub calendar_year: i32,
    /// Ordinary income used for the year (after overrides)
    pub taxable_income: f64,
    /// Signed cash infusion applied this year
    pub cash_infusion: f64,
    /// Collateral value at year end
    pub collateral_value: f64,
    /// QFAF subscription value at year end
    pub qfaf_value: f64,
    /// Collateral plus QFAF
    pub total_exposure: f64,
    /// Short-term losses harvested from the collateral this year
    pub st_losses_harvested: f64,
    /// Ordinary losses generated by the QFAF this year
    pub ordinary_losses_generated: f64,
    /// Ordinary loss deductible this year after the §461(l) and income caps
    pub usable_ordinary_loss: f64,
    /// Ordinary loss above the caps, routed to NOL carryforward
    pub excess_to_nol: f64,
    /// NOL carryforward absorbed against this year's remaining income
    pub nol_used: f64,
    /// NOL carryforward balance entering the year
    pub nol_carryforward_start: f64,
    /// NOL carryforward balance leaving the year
    pub nol_carryforward_end: f64,
    /// Advisor/management fee on collateral
    pub advisor_fee: f64,
    /// Financing fee on collateral
    pub financing_fee: f64,
    /// Sum of all fees
    pub total_fees: f64,
    /// Deduction value at the client's marginal rate
    pub tax_savings: f64,
    /// Tax savings net of fees
    pub net_benefit: f64,
    /// QFAF excess-return contribution (informational, non-tax)
    pub qfaf_alpha: f64,
    /// Collateral excess-return contribution (informational, non-tax)
    pub collateral_alpha: f64,
    /// Set when a withdrawal exceeded the grown balance and was clamped
    pub collateral_floored: bool,
}

/// Cumulative totals and final balances over a projected horizon
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionSummary {
    pub years_projected: u32,
    pub total_st_losses_harvested: f64,
    pub total_ordinary_losses_generated: f64,
    pub total_usable_ordinary_loss: f64,
    pub total_nol_used: f64,
    pub total_fees: f64,
    pub total_tax_savings: f64,
    pub total_net_benefit: f64,
    pub final_collateral_value: f64,
    pub final_qfaf_value: f64,
    pub final_total_exposure: f64,
    pub final_nol_carryforward: f64,
    /// Pre-existing capital-loss carryforward, unchanged by the strategy
    pub capital_loss_carryforward: f64,
    /// Average per-year tax savings as a fraction of average exposure
    pub annualized_tax_alpha: f64,
}

impl ProjectionSummary {
    /// Reduce a year series into cumulative totals
    ///
    /// Tolerates an empty series (all-zero summary) so callers can render
    /// before the first projection completes.
    pub fn from_years(years: &[YearResult], capital_loss_carryforward: f64) -> Self {
        let Some(last) = years.last() else {
            return Self {
                years_projected: 0,
                total_st_losses_harvested: 0.0,
                total_ordinary_losses_generated: 0.0,
                total_usable_ordinary_loss: 0.0,
                total_nol_used: 0.0,
                total_fees: 0.0,
                total_tax_savings: 0.0,
                total_net_benefit: 0.0,
                final_collateral_value: 0.0,
                final_qfaf_value: 0.0,
                final_total_exposure: 0.0,
                final_nol_carryforward: 0.0,
                capital_loss_carryforward,
                annualized_tax_alpha: 0.0,
            };
        };

        let n = years.len() as f64;
        let total_tax_savings: f64 = years.iter().map(|y| y.tax_savings).sum();
        let avg_exposure: f64 = years.iter().map(|y| y.total_exposure).sum::<f64>() / n;

        let annualized_tax_alpha = if avg_exposure > 0.0 {
            total_tax_savings / (avg_exposure * n)
        } else {
            0.0
        };

        Self {
            years_projected: years.len() as u32,
            total_st_losses_harvested: years.iter().map(|y| y.st_losses_harvested).sum(),
            total_ordinary_losses_generated: years
                .iter()
                .map(|y| y.ordinary_losses_generated)
                .sum(),
            total_usable_ordinary_loss: years.iter().map(|y| y.usable_ordinary_loss).sum(),
            total_nol_used: years.iter().map(|y| y.nol_used).sum(),
            total_fees: years.iter().map(|y| y.total_fees).sum(),
            total_tax_savings,
            total_net_benefit: years.iter().map(|y| y.net_benefit).sum(),
            final_collateral_value: last.collateral_value,
            final_qfaf_value: last.qfaf_value,
            final_total_exposure: last.total_exposure,
            final_nol_carryforward: last.nol_carryforward_end,
            capital_loss_carryforward,
            annualized_tax_alpha,
        }
    }
}

/// Complete output of one projection run
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResult {
    pub years: Vec<YearResult>,
    pub summary: ProjectionSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_year(year: u32, tax_savings: f64, exposure: f64) -> YearResult {
        YearResult {
            year,
            calendar_year: 2024 + year as i32,
            taxable_income: 1_000_000.0,
            cash_infusion: 0.0,
            collateral_value: exposure * 0.6,
            qfaf_value: exposure * 0.4,
            total_exposure: exposure,
            st_losses_harvested: 100_000.0,
            ordinary_losses_generated: 200_000.0,
            usable_ordinary_loss: 150_000.0,
            excess_to_nol: 50_000.0,
            nol_used: 10_000.0,
            nol_carryforward_start: 0.0,
            nol_carryforward_end: 50_000.0,
            advisor_fee: 30_000.0,
            financing_fee: 20_000.0,
            total_fees: 50_000.0,
            tax_savings,
            net_benefit: tax_savings - 50_000.0,
            qfaf_alpha: 0.0,
            collateral_alpha: 0.0,
            collateral_floored: false,
        }
    }

    #[test]
    fn test_empty_series_yields_zero_summary() {
        let summary = ProjectionSummary::from_years(&[], 75_000.0);

        assert_eq!(summary.years_projected, 0);
        assert_eq!(summary.total_tax_savings, 0.0);
        assert_eq!(summary.final_collateral_value, 0.0);
        assert_eq!(summary.annualized_tax_alpha, 0.0);
        // Pass-through balance survives even with no projected years
        assert_eq!(summary.capital_loss_carryforward, 75_000.0);
    }

    #[test]
    fn test_sums_and_final_balances() {
        let years = vec![
            sample_year(1, 100_000.0, 5_000_000.0),
            sample_year(2, 80_000.0, 6_000_000.0),
        ];
        let summary = ProjectionSummary::from_years(&years, 0.0);

        assert_eq!(summary.years_projected, 2);
        assert_eq!(summary.total_st_losses_harvested, 200_000.0);
        assert_eq!(summary.total_usable_ordinary_loss, 300_000.0);
        assert_eq!(summary.total_tax_savings, 180_000.0);
        assert_eq!(summary.total_fees, 100_000.0);
        // Final balances come from the last year, not a sum
        assert_eq!(summary.final_total_exposure, 6_000_000.0);
        assert_eq!(summary.final_nol_carryforward, 50_000.0);
    }

    #[test]
    fn test_annualized_tax_alpha() {
        let years = vec![
            sample_year(1, 100_000.0, 5_000_000.0),
            sample_year(2, 80_000.0, 6_000_000.0),
        ];
        let summary = ProjectionSummary::from_years(&years, 0.0);

        // 180k savings over avg exposure 5.5M for 2 years
        let expected = 180_000.0 / (5_500_000.0 * 2.0);
        assert!((summary.annualized_tax_alpha - expected).abs() < 1e-12);
    }
}
