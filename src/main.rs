//! Severance Valuation CLI
//!
//! Values an employee book, or rolls it forward over the reporting period, and
//! writes one row per employee as CSV (default) or JSON.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use severance_valuation::employee::load_employees;
use severance_valuation::rollforward::{
    load_closing_overrides, load_opening_balances, OpeningBalances,
};
use severance_valuation::{Assumptions, EmployeeBook, ValuationConfig, ValuationRunner};

#[derive(Parser, Debug)]
#[command(
    name = "severance-valuation",
    version,
    about = "Severance obligation valuation and IAS19 roll-forward"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Present value of each employee's severance obligation
    Value {
        #[command(flatten)]
        inputs: InputArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Movement schedule from opening to closing balances
    RollForward {
        #[command(flatten)]
        inputs: InputArgs,
        /// CSV with employee_id,pv_open,assets_open
        #[arg(long)]
        opening_balances: Option<PathBuf>,
        /// CSV with employee_id,pv_close replacing computed closing values
        #[arg(long)]
        closing_overrides: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Employee CSV
    #[arg(long)]
    employees: PathBuf,
    /// Male life table CSV (age,lx,px,qx)
    #[arg(long)]
    male_mortality: PathBuf,
    /// Female life table CSV (age,lx,px,qx)
    #[arg(long)]
    female_mortality: PathBuf,
    /// Turnover bands CSV; standard bands when omitted
    #[arg(long)]
    decrements: Option<PathBuf>,
    /// Discount curve CSV; standard curve when omitted
    #[arg(long)]
    discount_curve: Option<PathBuf>,
    /// JSON run configuration; defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output file; stdout when omitted
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Write JSON instead of CSV
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Value { inputs, output } => {
            let (runner, book) = prepare(&inputs)?;
            let results = runner.value_all(&book);
            if output.json {
                write_json(&results, output.output.as_deref())
            } else {
                let records: Vec<_> = results.iter().map(|r| r.record()).collect();
                write_csv(&records, output.output.as_deref())
            }
        }
        Command::RollForward {
            inputs,
            opening_balances,
            closing_overrides,
            output,
        } => {
            let (runner, book) = prepare(&inputs)?;
            let openings = match opening_balances {
                Some(path) => load_opening_balances(&path)
                    .with_context(|| format!("loading opening balances from {}", path.display()))?,
                None => OpeningBalances::default(),
            };
            let overrides = match closing_overrides {
                Some(path) => load_closing_overrides(&path)
                    .with_context(|| format!("loading closing overrides from {}", path.display()))?,
                None => BTreeMap::new(),
            };

            let schedules = runner.roll_forward_all(&book, &openings, &overrides);
            if output.json {
                write_json(&schedules, output.output.as_deref())
            } else {
                write_csv(&schedules, output.output.as_deref())
            }
        }
    }
}

fn prepare(inputs: &InputArgs) -> Result<(ValuationRunner, EmployeeBook)> {
    let config = match &inputs.config {
        Some(path) => ValuationConfig::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ValuationConfig::default(),
    };
    let assumptions = Assumptions::from_csv_paths(
        &inputs.male_mortality,
        &inputs.female_mortality,
        inputs.decrements.as_deref(),
        inputs.discount_curve.as_deref(),
    )
    .context("loading reference tables")?;
    let book = load_employees(&inputs.employees)
        .with_context(|| format!("loading employees from {}", inputs.employees.display()))?;

    log::info!(
        "loaded {} employees, valuation date {}",
        book.len(),
        config.valuation_date
    );
    Ok((ValuationRunner::new(assumptions, config), book))
}

fn sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}

fn write_csv<T: Serialize>(rows: &[T], path: Option<&Path>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink(path)?);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json<T: Serialize>(rows: &[T], path: Option<&Path>) -> Result<()> {
    let mut out = sink(path)?;
    serde_json::to_writer_pretty(&mut out, rows)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
