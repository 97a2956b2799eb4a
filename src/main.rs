//! All-In Margin Calculator CLI
//!
//! Reads a JSON parameter object, runs the calculation once and prints the
//! schedule, yield decomposition, WAL and validation summary. Any input
//! failure produces the same structured failure payload the web boundary
//! would return, and a nonzero exit code.

use allin_margin::{calculate, report, CalculationRequest, CalculationResponse, FailureResponse};
use anyhow::Context;
use clap::Parser;
use log::debug;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "allin-margin",
    about = "Amortization schedule and all-in margin calculator"
)]
struct Args {
    /// Path to the JSON parameter file, or '-' for stdin
    input: PathBuf,

    /// Write the schedule to this path as CSV
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Emit the full response as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let failure = FailureResponse::new(err.to_string());
            match serde_json::to_string(&failure) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let raw = if args.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("reading {}", args.input.display()))?
    };

    let request: CalculationRequest =
        serde_json::from_str(&raw).context("parsing request JSON")?;
    let terms = request.into_terms()?;
    debug!(
        "calculating: {} {} periods, {:?} profile",
        terms.num_periods,
        terms.frequency.as_str(),
        terms.amortization_profile
    );

    let result = calculate(&terms);
    let response = CalculationResponse::from_result(&result);

    if let Some(path) = &args.csv {
        let csv_text = report::schedule_to_csv(&result.schedule)
            .map_err(|e| anyhow::anyhow!("rendering CSV: {}", e))?;
        fs::write(path, csv_text).with_context(|| format!("writing {}", path.display()))?;
        println!("Schedule written to: {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("All-In Margin Calculator v0.1.0");
    println!("===============================\n");

    println!(
        "{:>6} {:>12} {:>5} {:>15} {:>15} {:>14} {:>12} {:>12} {:>14} {:>15}",
        "Period",
        "Date",
        "Days",
        "Beg Balance",
        "Draws",
        "Amortization",
        "Interest",
        "Upfront",
        "Commitment",
        "End Balance"
    );
    println!("{}", "-".repeat(132));
    for row in &response.schedule {
        println!(
            "{:>6} {:>12} {:>5} {:>15.2} {:>15.2} {:>14.2} {:>12.2} {:>12.2} {:>14.2} {:>15.2}",
            row.period,
            row.date,
            row.days,
            row.beginning_bal,
            row.draws,
            row.amortization,
            row.interest,
            row.upfront_fee,
            row.commitment_fee,
            row.ending_bal
        );
    }

    println!("\nYield decomposition (% p.a.):");
    println!("  IR Spread:         {:>10.6}", response.irr.ir_spread);
    println!("  Upfront Impact:    {:>10.6}", response.irr.upfront_impact);
    println!("  Commitment Impact: {:>10.6}", response.irr.commitment_impact);
    println!("  All-in Margin:     {:>10.6}", response.irr.all_in_margin);

    println!("\nWAL: {:.4} years", response.wal);

    let v = &response.validation;
    println!("\nValidation:");
    println!(
        "  Total Draws:   {:.2} ({})",
        v.draws_total,
        v.draw_status.as_str()
    );
    println!("  Total Amort:   {:.2}", v.amort_total);
    println!("  Final Balance: {:.2}", v.final_balance);
    println!(
        "  Balances:      {}",
        if v.balance_ok {
            "OK"
        } else {
            "Negative balance detected"
        }
    );

    Ok(())
}
