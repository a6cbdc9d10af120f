//! The multi-year projection state machine
//!
//! A single forward fold over years 1..=N. Each year consumes the prior
//! carried state and emits one immutable [`YearResult`]; no year is revised
//! once finalized. Validation happens once at entry; after that the run
//! cannot fail and never returns a partial series.

use crate::assumptions::{Assumptions, NOL_USABLE_FRACTION};
use crate::client::{all_default, resolve_overrides, ClientProfile, ResolvedYear, YearOverride};
use crate::error::ProjectionError;
use crate::projection::results::{ProjectionResult, ProjectionSummary, YearResult};
use crate::projection::sizing::SizingApproach;
use crate::projection::state::CarriedState;
use crate::projection::{DEFAULT_PROJECTION_YEARS, MAX_PROJECTION_YEARS};

/// Run-level configuration
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of years to project (must be at least 1)
    pub projection_years: u32,
    /// Calendar year of projection year 1
    pub base_year: i32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projection_years: DEFAULT_PROJECTION_YEARS,
            base_year: 2025,
        }
    }
}

/// Projection engine bound to one assumption set and configuration
///
/// Pure and reentrant: every call is a function of its inputs alone, so
/// distinct clients can be projected in parallel from the call site with no
/// coordination.
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self {
            assumptions,
            config,
        }
    }

    /// Baseline projection with no overrides
    ///
    /// QFAF follows the fixed decay trajectory.
    pub fn project(&self, profile: &ClientProfile) -> Result<ProjectionResult, ProjectionError> {
        self.validate(profile)?;
        let resolved =
            resolve_overrides(profile.annual_income, self.config.projection_years, &[])?;
        self.run(profile, &resolved, SizingApproach::FixedTrajectory)
    }

    /// Override-aware projection
    ///
    /// QFAF sizing follows the collateral's loss-offsetting capacity with
    /// the profile's sizing lag. With an empty or all-default override list
    /// this produces the same numbers as [`ProjectionEngine::project`].
    pub fn project_with_overrides(
        &self,
        profile: &ClientProfile,
        overrides: &[YearOverride],
    ) -> Result<ProjectionResult, ProjectionError> {
        self.validate(profile)?;
        let resolved = resolve_overrides(
            profile.annual_income,
            self.config.projection_years,
            overrides,
        )?;
        // With nothing overridden the capacity ratio is identically 1, so
        // the baseline trajectory applies as-is.
        let sizing = if all_default(overrides) {
            SizingApproach::FixedTrajectory
        } else {
            SizingApproach::CollateralDriven {
                lag_years: profile.sizing_lag_years,
            }
        };
        self.run(profile, &resolved, sizing)
    }

    /// Entry validation: configuration errors reject the whole run
    fn validate(&self, profile: &ClientProfile) -> Result<(), ProjectionError> {
        if self.config.projection_years == 0 || self.config.projection_years > MAX_PROJECTION_YEARS
        {
            return Err(ProjectionError::InvalidHorizon(self.config.projection_years));
        }
        self.assumptions.validate()?;
        profile.validate()?;
        self.assumptions.strategies.schedule(&profile.strategy_id)?;
        Ok(())
    }

    /// The year loop. Inputs are fully validated by this point.
    fn run(
        &self,
        profile: &ClientProfile,
        resolved: &[ResolvedYear],
        sizing: SizingApproach,
    ) -> Result<ProjectionResult, ProjectionError> {
        let market = &self.assumptions.market;
        let schedule = self.assumptions.strategies.schedule(&profile.strategy_id)?;
        let limit = self.assumptions.limits.limit_for(profile.filing_status);
        let marginal_rate = profile.marginal_rate(market.federal_marginal_rate);
        let growth = 1.0 + market.collateral_growth_rate;

        log::info!(
            "projecting {} years, strategy {:?}, sizing {:?}",
            resolved.len(),
            profile.strategy_id,
            sizing
        );

        let mut state = CarriedState::opening(profile);
        let mut baseline_collateral = profile.initial_collateral;
        let mut actual_history = Vec::with_capacity(resolved.len());
        let mut baseline_history = Vec::with_capacity(resolved.len());
        let mut years = Vec::with_capacity(resolved.len());

        for entry in resolved {
            let year = entry.year;

            // 1. Grow the collateral and apply the year's cash flow. A
            // withdrawal beyond the grown balance clamps to zero and is
            // flagged on the row.
            let grown = state.collateral * growth + entry.cash_infusion;
            let collateral_floored = grown < 0.0;
            let collateral = grown.max(0.0);

            baseline_collateral *= growth;
            actual_history.push(collateral);
            baseline_history.push(baseline_collateral);

            // 2. Harvest ST losses off the collateral.
            let st_losses_harvested = collateral * schedule.rate_for(year);

            // 3. Size the QFAF subscription.
            let qfaf = if profile.qfaf_enabled {
                sizing.qfaf_value(
                    year,
                    state.qfaf,
                    profile.initial_collateral,
                    market,
                    &actual_history,
                    &baseline_history,
                )
            } else {
                0.0
            };

            // 4. Ordinary losses generated by the QFAF.
            let ordinary_losses_generated = qfaf * market.loss_multiplier;

            // 5. §461(l) cap and income cap. Zero or negative income forces
            // the usable loss to zero.
            let taxable_income = entry.income;
            let usable_ordinary_loss = ordinary_losses_generated
                .min(limit)
                .min(taxable_income)
                .max(0.0);

            // 6. Excess routes to NOL. Only the balance entering the year is
            // usable this year; this year's excess carries forward.
            let excess_to_nol = ordinary_losses_generated - usable_ordinary_loss;
            let nol_carryforward_start = state.nol_carryforward;

            // 7. NOL absorbs up to 80% of the income remaining after the
            // deduction, bounded by the entering balance.
            let remaining_income = (taxable_income - usable_ordinary_loss).max(0.0);
            let nol_used = (NOL_USABLE_FRACTION * remaining_income)
                .min(nol_carryforward_start)
                .max(0.0);
            let nol_carryforward_end = nol_carryforward_start - nol_used + excess_to_nol;

            // 8. Fees on collateral value.
            let advisor_fee = collateral * market.advisor_fee_rate;
            let financing_fee = collateral * market.financing_fee_rate;
            let total_fees = advisor_fee + financing_fee;

            // 9. Deduction value and informational alpha.
            let tax_savings = (usable_ordinary_loss + nol_used) * marginal_rate;
            let net_benefit = tax_savings - total_fees;
            let qfaf_alpha = qfaf * market.qfaf_alpha_rate;
            let collateral_alpha = collateral * market.collateral_alpha_rate;

            log::debug!(
                "year {year}: collateral {collateral:.0}, qfaf {qfaf:.0}, usable {usable_ordinary_loss:.0}, nol {nol_carryforward_start:.0} -> {nol_carryforward_end:.0}"
            );

            years.push(YearResult {
                year,
                calendar_year: self.config.base_year + (year as i32 - 1),
                taxable_income,
                cash_infusion: entry.cash_infusion,
                collateral_value: collateral,
                qfaf_value: qfaf,
                total_exposure: collateral + qfaf,
                st_losses_harvested,
                ordinary_losses_generated,
                usable_ordinary_loss,
                excess_to_nol,
                nol_used,
                nol_carryforward_start,
                nol_carryforward_end,
                advisor_fee,
                financing_fee,
                total_fees,
                tax_savings,
                net_benefit,
                qfaf_alpha,
                collateral_alpha,
                collateral_floored,
            });

            // 10. Thread the carried balances into the next year.
            state = CarriedState {
                collateral,
                qfaf,
                nol_carryforward: nol_carryforward_end,
            };
        }

        let summary = ProjectionSummary::from_years(
            &years,
            profile.st_loss_carryforward + profile.lt_loss_carryforward,
        );
        Ok(ProjectionResult { years, summary })
    }
}

/// Baseline projection with no overrides
pub fn project(
    profile: &ClientProfile,
    assumptions: &Assumptions,
    config: &ProjectionConfig,
) -> Result<ProjectionResult, ProjectionError> {
    ProjectionEngine::new(assumptions.clone(), config.clone()).project(profile)
}

/// Override-aware projection; identical to [`project`] when `overrides` is
/// empty or all-default
pub fn project_with_overrides(
    profile: &ClientProfile,
    assumptions: &Assumptions,
    config: &ProjectionConfig,
    overrides: &[YearOverride],
) -> Result<ProjectionResult, ProjectionError> {
    ProjectionEngine::new(assumptions.clone(), config.clone()).project_with_overrides(profile, overrides)
}
