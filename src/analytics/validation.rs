//! Schedule sanity checks
//!
//! Advisory only: the flags feed the result payload and never block or alter
//! the schedule.

use serde::Serialize;

use crate::schedule::Schedule;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Draw reconciliation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DrawStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Review Draw")]
    ReviewDraw,
}

impl DrawStatus {
    /// Get the string representation shown to users
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawStatus::Ok => "OK",
            DrawStatus::ReviewDraw => "Review Draw",
        }
    }
}

/// Advisory validation of a built schedule. Totals are rounded for display
/// and never fed back into the calculation.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub draws_total: f64,
    pub amort_total: f64,
    pub final_balance: f64,
    pub draw_status: DrawStatus,
    pub balance_ok: bool,
}

/// Check that total draws reconcile to the loan amount (1.0 currency-unit
/// tolerance) and that no ending balance dips below -0.01.
pub fn validate(schedule: &Schedule, loan_amount: f64) -> ValidationReport {
    let draws_total = schedule.total_draws();
    let amort_total = schedule.total_amortization();
    let final_balance = schedule.final_balance();

    let draw_ok = (draws_total - loan_amount).abs() <= 1.0;
    let negative_bal = schedule.rows.iter().any(|r| r.ending_bal < -0.01);

    ValidationReport {
        draws_total: round2(draws_total),
        amort_total: round2(amort_total),
        final_balance: round2(final_balance),
        draw_status: if draw_ok {
            DrawStatus::Ok
        } else {
            DrawStatus::ReviewDraw
        },
        balance_ok: !negative_bal,
    }
}
