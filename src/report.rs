//! Result serialization and CSV export
//!
//! Display rounding happens here, not in the engine: schedule rows keep full
//! precision internally and are rounded to 2 decimals on the way out.

use std::error::Error;

use serde::Serialize;

use crate::analytics::{ValidationReport, YieldResult};
use crate::calculator::CalculationResult;
use crate::schedule::{Schedule, ScheduleRow};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Schedule row with display rounding applied and the date as an ISO string
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub period: u32,
    pub date: String,
    pub days: i64,
    pub beginning_bal: f64,
    pub draws: f64,
    pub amortization: f64,
    pub interest: f64,
    pub upfront_fee: f64,
    pub commitment_fee: f64,
    pub ending_bal: f64,
}

impl DisplayRow {
    fn from_row(row: &ScheduleRow) -> Self {
        Self {
            period: row.period,
            date: row.date.format("%Y-%m-%d").to_string(),
            days: row.days,
            beginning_bal: round2(row.beginning_bal),
            draws: round2(row.draws),
            amortization: round2(row.amortization),
            interest: round2(row.interest),
            upfront_fee: round2(row.upfront_fee),
            commitment_fee: round2(row.commitment_fee),
            ending_bal: round2(row.ending_bal),
        }
    }
}

/// Successful calculation payload
#[derive(Debug, Serialize)]
pub struct CalculationResponse {
    pub success: bool,
    pub schedule: Vec<DisplayRow>,
    pub irr: YieldResult,
    pub wal: f64,
    pub validation: ValidationReport,
}

impl CalculationResponse {
    pub fn from_result(result: &CalculationResult) -> Self {
        Self {
            success: true,
            schedule: result.schedule.rows.iter().map(DisplayRow::from_row).collect(),
            irr: result.yield_result.clone(),
            wal: result.wal,
            validation: result.validation.clone(),
        }
    }
}

/// Failure payload for any rejected input; never carries partial results
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl FailureResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}

/// Fixed export header, one column per schedule field
pub const CSV_HEADER: [&str; 10] = [
    "Period",
    "Date",
    "Days",
    "Beginning Balance",
    "Draws",
    "Amortization",
    "Interest",
    "Upfront Fee",
    "Commitment Fee",
    "Ending Balance",
];

/// Render the schedule as CSV with monetary cells at 2 decimals.
pub fn schedule_to_csv(schedule: &Schedule) -> Result<String, Box<dyn Error>> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(CSV_HEADER)?;

        for row in &schedule.rows {
            writer.write_record(&[
                row.period.to_string(),
                row.date.format("%Y-%m-%d").to_string(),
                row.days.to_string(),
                format!("{:.2}", row.beginning_bal),
                format!("{:.2}", row.draws),
                format!("{:.2}", row.amortization),
                format!("{:.2}", row.interest),
                format!("{:.2}", row.upfront_fee),
                format!("{:.2}", row.commitment_fee),
                format!("{:.2}", row.ending_bal),
            ])?;
        }

        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}
