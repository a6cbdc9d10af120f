//! Run a single-client projection and write per-year results to CSV
//!
//! Outputs one row per projected year plus a printed summary block.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Datelike;
use clap::Parser;

use harvest_planner::client::{load_overrides, ClientProfile, FilingStatus, YearOverride};
use harvest_planner::projection::{ProjectionConfig, ProjectionEngine, DEFAULT_PROJECTION_YEARS};
use harvest_planner::{assumptions::MarketAssumptions, Assumptions};

#[derive(Parser, Debug)]
#[command(
    name = "run_projection",
    about = "Project a leveraged tax-loss-harvesting strategy for one client"
)]
struct Args {
    /// Filing status selector (single, mfj, mfs, hoh)
    #[arg(long, default_value = "mfj")]
    filing_status: String,

    /// Baseline annual ordinary income
    #[arg(long, default_value_t = 1_000_000.0)]
    income: f64,

    /// Initial collateral investment
    #[arg(long, default_value_t = 5_000_000.0)]
    collateral: f64,

    /// Collateral strategy identifier
    #[arg(long, default_value = "Core 145/45")]
    strategy: String,

    /// Two-letter state code (display only)
    #[arg(long, default_value = "")]
    state: String,

    /// State marginal ordinary-income rate
    #[arg(long, default_value_t = 0.0)]
    state_rate: f64,

    /// Projection length in years
    #[arg(long, default_value_t = DEFAULT_PROJECTION_YEARS)]
    years: u32,

    /// Calendar year of projection year 1 (defaults to the current year)
    #[arg(long)]
    base_year: Option<i32>,

    /// Pre-existing NOL carryforward
    #[arg(long, default_value_t = 0.0)]
    nol: f64,

    /// Disable the QFAF overlay
    #[arg(long)]
    no_qfaf: bool,

    /// Years before QFAF sizing responds to collateral changes
    #[arg(long, default_value_t = 1)]
    sizing_lag: u32,

    /// CSV of per-year overrides (year,income,cash_infusion,note)
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// JSON file of market assumptions; omitted fields keep their defaults
    #[arg(long)]
    assumptions: Option<PathBuf>,

    /// Output CSV path
    #[arg(long, default_value = "projection_output.csv")]
    output: PathBuf,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut assumptions = Assumptions::default_advisory();
    if let Some(path) = &args.assumptions {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading assumptions file {}", path.display()))?;
        let market: MarketAssumptions =
            serde_json::from_str(&data).context("parsing market assumptions JSON")?;
        assumptions.market = market;
    }

    let profile = ClientProfile {
        filing_status: FilingStatus::parse(&args.filing_status),
        state_code: args.state.clone(),
        state_tax_rate: args.state_rate,
        annual_income: args.income,
        strategy_id: args.strategy.clone(),
        initial_collateral: args.collateral,
        st_loss_carryforward: 0.0,
        lt_loss_carryforward: 0.0,
        nol_carryforward: args.nol,
        qfaf_enabled: !args.no_qfaf,
        sizing_lag_years: args.sizing_lag,
    };

    let config = ProjectionConfig {
        projection_years: args.years,
        base_year: args
            .base_year
            .unwrap_or_else(|| chrono::Utc::now().year()),
    };

    let overrides: Vec<YearOverride> = match &args.overrides {
        Some(path) => load_overrides(path)
            .map_err(|e| anyhow!("failed to load overrides from {}: {e}", path.display()))?,
        None => Vec::new(),
    };

    let engine = ProjectionEngine::new(assumptions, config);
    let result = if overrides.is_empty() {
        engine.project(&profile)?
    } else {
        engine.project_with_overrides(&profile, &overrides)?
    };

    // Write per-year output
    let mut file = File::create(&args.output)
        .with_context(|| format!("creating output file {}", args.output.display()))?;
    writeln!(
        file,
        "Year,CalendarYear,TaxableIncome,CashInfusion,Collateral,QFAF,TotalExposure,STLossesHarvested,OrdinaryLossesGenerated,UsableOrdinaryLoss,ExcessToNOL,NOLUsed,NOLStart,NOLEnd,AdvisorFee,FinancingFee,TotalFees,TaxSavings,NetBenefit"
    )?;
    for row in &result.years {
        writeln!(
            file,
            "{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            row.year,
            row.calendar_year,
            row.taxable_income,
            row.cash_infusion,
            row.collateral_value,
            row.qfaf_value,
            row.total_exposure,
            row.st_losses_harvested,
            row.ordinary_losses_generated,
            row.usable_ordinary_loss,
            row.excess_to_nol,
            row.nol_used,
            row.nol_carryforward_start,
            row.nol_carryforward_end,
            row.advisor_fee,
            row.financing_fee,
            row.total_fees,
            row.tax_savings,
            row.net_benefit,
        )?;
    }
    println!("Output written to {}", args.output.display());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
        return Ok(());
    }

    let summary = &result.summary;
    println!("\nProjection Summary ({} years):", summary.years_projected);
    println!("  ST losses harvested:     ${:>15.0}", summary.total_st_losses_harvested);
    println!("  Ordinary losses:         ${:>15.0}", summary.total_ordinary_losses_generated);
    println!("  Usable ordinary losses:  ${:>15.0}", summary.total_usable_ordinary_loss);
    println!("  NOL used:                ${:>15.0}", summary.total_nol_used);
    println!("  Total fees:              ${:>15.0}", summary.total_fees);
    println!("  Total tax savings:       ${:>15.0}", summary.total_tax_savings);
    println!("  Net benefit:             ${:>15.0}", summary.total_net_benefit);
    println!("  Final collateral:        ${:>15.0}", summary.final_collateral_value);
    println!("  Final QFAF:              ${:>15.0}", summary.final_qfaf_value);
    println!("  Final NOL carryforward:  ${:>15.0}", summary.final_nol_carryforward);
    println!("  Annualized tax alpha:    {:>15.2}%", summary.annualized_tax_alpha * 100.0);

    Ok(())
}
