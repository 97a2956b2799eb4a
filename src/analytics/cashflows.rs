//! Lender-perspective cash-flow series derived from a schedule

use crate::schedule::Schedule;

/// Three progressively fee-inclusive net cash-flow series, aligned by period
/// index. Positive = cash to the lender.
#[derive(Debug, Clone)]
pub struct CashflowSeries {
    /// Interest + principal only (IR spread view)
    pub spread: Vec<f64>,
    /// `spread` + upfront fee
    pub with_upfront: Vec<f64>,
    /// `with_upfront` + commitment fee (all-in view)
    pub all_in: Vec<f64>,
}

impl CashflowSeries {
    /// Derive all three series from an already-built schedule.
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let mut spread = Vec::with_capacity(schedule.rows.len());
        let mut with_upfront = Vec::with_capacity(schedule.rows.len());
        let mut all_in = Vec::with_capacity(schedule.rows.len());

        for row in &schedule.rows {
            let base = row.interest + row.amortization - row.draws;
            spread.push(base);
            with_upfront.push(base + row.upfront_fee);
            all_in.push(base + row.upfront_fee + row.commitment_fee);
        }

        Self {
            spread,
            with_upfront,
            all_in,
        }
    }
}
