//! Internal rate of return and yield decomposition
//!
//! Solves the periodic IRR of each cash-flow series using the Newton-Raphson
//! method with a bisection fallback, then annualizes nominally by the payment
//! frequency multiplier (Monthly x12, Quarterly x4, Semiannually x2).

use serde::Serialize;

use super::cashflows::CashflowSeries;
use crate::terms::Frequency;

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// IRR component breakdown, all fields annualized percentages.
///
/// Additive decomposition: `all_in_margin = ir_spread + upfront_impact +
/// commitment_impact` up to rounding.
#[derive(Debug, Clone, Serialize)]
pub struct YieldResult {
    pub ir_spread: f64,
    pub upfront_impact: f64,
    pub commitment_impact: f64,
    pub all_in_margin: f64,
}

/// Annualized IRR of one cash-flow series, as a decimal rate.
///
/// All-zero series and failed solves both return 0.0: degenerate fee
/// structures are legitimate configurations, not errors.
pub fn annualized_irr(cashflows: &[f64], frequency: Frequency) -> f64 {
    if cashflows.iter().all(|&cf| cf.abs() < 1e-10) {
        return 0.0;
    }

    match periodic_irr(cashflows) {
        Some(rate) => rate * frequency.periods_per_year() as f64,
        None => 0.0,
    }
}

/// Compose the yield decomposition from the three fee-inclusion depths.
pub fn yield_components(series: &CashflowSeries, frequency: Frequency) -> YieldResult {
    let ir_spread = annualized_irr(&series.spread, frequency);
    let with_upfront = annualized_irr(&series.with_upfront, frequency);
    let all_in = annualized_irr(&series.all_in, frequency);

    YieldResult {
        ir_spread: round6(ir_spread * 100.0),
        upfront_impact: round6((with_upfront - ir_spread) * 100.0),
        commitment_impact: round6((all_in - with_upfront) * 100.0),
        all_in_margin: round6(all_in * 100.0),
    }
}

/// Solve for the periodic rate r such that sum(cf_i / (1+r)^i) = 0
/// using Newton-Raphson iteration.
fn periodic_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    // IRR only exists with at least one sign change
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.01; // Initial guess: 1% per period
    let tolerance = 1e-10;
    let max_iterations = 1000;

    for _ in 0..max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            // Derivative too small, try bisection instead
            return periodic_irr_bisection(cashflows);
        }

        let new_rate = (rate - npv / dnpv).max(-0.99).min(10.0);

        if (new_rate - rate).abs() < tolerance {
            return Some(new_rate);
        }

        rate = new_rate;
    }

    // Newton-Raphson didn't converge, try bisection
    periodic_irr_bisection(cashflows)
}

/// Calculate NPV and its derivative with respect to the rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using the bisection method
fn periodic_irr_bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 10.0_f64;
    let tolerance = 1e-10;
    let max_iterations = 1000;

    let npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    // Check that the interval brackets a root
    if npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(mid);
        }

        if npv_mid * npv_at_rate(cashflows, low) < 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    None
}

/// Calculate NPV at a given periodic rate
fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
