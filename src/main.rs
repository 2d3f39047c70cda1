//! Growth Projection CLI
//!
//! Command-line interface for running investment growth projections

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use growth_projection::projection::{Compounding, PhaseOverlap};
use growth_projection::report::{format::currency, write_csv_file};
use growth_projection::scenario::{load_lump_sums, load_phases, load_scenario};
use growth_projection::{
    ContributionPhase, Escalation, InflationSettings, LumpSumEvent, ProjectionConfig,
    ProjectionEngine, Report, ScenarioInput, ScenarioRunner,
};

/// Project investment growth with phased contributions, lump sums and inflation
#[derive(Parser)]
#[command(name = "growth-projection", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a projection for a scenario file
    Run(RunArgs),
    /// Rerun a scenario at several rates of return
    Compare(CompareArgs),
    /// Print a sample scenario file
    Sample,
}

#[derive(clap::Args)]
struct ScenarioArgs {
    /// Scenario JSON file
    #[arg(long, short)]
    scenario: PathBuf,

    /// Replace the scenario's phases with a CSV table
    /// (StartAge,EndAge,MonthlyContribution,AnnualIncreasePct,AnnualIncreaseAmount).
    /// AnnualIncreasePct is in percentage points: 3 means 3% per year.
    #[arg(long)]
    phases_csv: Option<PathBuf>,

    /// Replace the scenario's lump sums with a CSV table (Age,Amount)
    #[arg(long)]
    lump_sums_csv: Option<PathBuf>,

    /// Convert the annual return with r/12 instead of (1+r)^(1/12)-1
    #[arg(long)]
    apr: bool,

    /// Let the latest-starting phase win where phases overlap
    #[arg(long)]
    allow_overlap: bool,
}

impl ScenarioArgs {
    fn load(&self) -> Result<ScenarioInput> {
        let mut scenario = load_scenario(&self.scenario)
            .with_context(|| format!("loading scenario {}", self.scenario.display()))?;
        if let Some(path) = &self.phases_csv {
            scenario.phases =
                load_phases(path).with_context(|| format!("loading phases {}", path.display()))?;
        }
        if let Some(path) = &self.lump_sums_csv {
            scenario.lump_sums = load_lump_sums(path)
                .with_context(|| format!("loading lump sums {}", path.display()))?;
        }
        Ok(scenario)
    }

    fn config(&self) -> ProjectionConfig {
        ProjectionConfig {
            compounding: if self.apr {
                Compounding::NominalApr
            } else {
                Compounding::EffectiveAnnual
            },
            phase_overlap: if self.allow_overlap {
                PhaseOverlap::LatestStartWins
            } else {
                PhaseOverlap::Reject
            },
        }
    }
}

#[derive(clap::Args)]
struct RunArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Write the monthly series to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the text report to a file instead of stdout
    #[arg(long, conflicts_with = "json")]
    report: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Only keep year-end points in CSV and JSON output
    #[arg(long)]
    yearly: bool,
}

#[derive(clap::Args)]
struct CompareArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Annual rates of return to compare, as fractions
    #[arg(long, value_delimiter = ',', required = true)]
    rates: Vec<f64>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Run(args) => run(args),
        Commands::Compare(args) => compare(args),
        Commands::Sample => sample(),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: RunArgs) -> Result<()> {
    let scenario = args.scenario.load()?;
    let engine = ProjectionEngine::new(args.scenario.config());
    let result = engine.project(&scenario).context("projection failed")?;

    if let Some(path) = &args.csv {
        let points = if args.yearly {
            result.yearly()
        } else {
            result.points.iter().collect()
        };
        write_csv_file(path, points).with_context(|| format!("writing {}", path.display()))?;
    }

    if args.json {
        let mut output = result.clone();
        if args.yearly {
            output.points = result.yearly().into_iter().cloned().collect();
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let report = Report::new(&scenario, &result, engine.config());
    match &args.report {
        Some(path) => {
            report.write_to(path).with_context(|| format!("writing {}", path.display()))?;
            println!("Final nominal value: {}", currency(result.final_nominal));
            println!("Final inflation-adjusted value: {}", currency(result.final_real));
            println!("Report written to: {}", path.display());
        }
        None => print!("{}", report),
    }

    Ok(())
}

fn compare(args: CompareArgs) -> Result<()> {
    let scenario = args.scenario.load()?;
    let runner = ScenarioRunner::with_config(args.scenario.config());
    let results = runner.run_rates(&scenario, &args.rates);

    println!(
        "{:>8} {:>18} {:>18} {:>18} {:>18}",
        "Return", "Final Nominal", "Final Real", "4% Nominal", "4% Real"
    );
    println!("{}", "-".repeat(84));
    for (rate, result) in args.rates.iter().zip(results) {
        let result = result.with_context(|| format!("projection at {:.2}% failed", rate * 100.0))?;
        println!(
            "{:>7.2}% {:>18} {:>18} {:>18} {:>18}",
            rate * 100.0,
            currency(result.final_nominal),
            currency(result.final_real),
            currency(result.income_nominal),
            currency(result.income_real),
        );
    }
    Ok(())
}

fn sample() -> Result<()> {
    let scenario = ScenarioInput::new(80_000.0, 0.07, 22, 65)
        .with_inflation(InflationSettings::annual(0.03))
        .with_phase(ContributionPhase::new(22, 25, 500.0))
        .with_phase(ContributionPhase::new(25, 35, 3_000.0).with_escalation(Escalation::Amount(100.0)))
        .with_lump_sum(LumpSumEvent::new(37, 100_000.0));
    println!("{}", serde_json::to_string_pretty(&scenario)?);
    Ok(())
}
