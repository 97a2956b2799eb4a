//! Weighted average life

use crate::schedule::Schedule;

fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4
}

/// Amortization-weighted average life of the schedule, in years.
///
/// Each repayment is weighted by its month offset from disbursement
/// (period index x months per period). Zero total amortization returns 0.0
/// rather than dividing by zero.
pub fn weighted_average_life(schedule: &Schedule, frequency_months: u32) -> f64 {
    let total = schedule.total_amortization();
    if total == 0.0 {
        return 0.0;
    }

    let weighted: f64 = schedule
        .rows
        .iter()
        .filter(|r| r.amortization > 0.0)
        .map(|r| (r.period * frequency_months) as f64 * r.amortization / total)
        .sum();

    round4(weighted / 12.0)
}
