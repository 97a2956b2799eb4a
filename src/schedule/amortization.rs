//! Amortization profile policies
//!
//! Computes the scheduled principal repayment inputs for the three supported
//! profiles: bullet, ad-hoc schedule, mortgage-style annuity. The schedule
//! builder applies the balance cap and final-period payoff rules.

use crate::terms::AdhocBreakpoint;

/// Ad-hoc payment lookup: step function over month offsets.
///
/// Selects the breakpoint with the largest month offset <= `period_months`;
/// the last value holds until superseded. Returns 0.0 before the first
/// breakpoint or for an empty table. The table is re-sorted on every call,
/// so callers may pass it in any order.
pub fn adhoc_payment(
    loan_amount: f64,
    period_months: i32,
    adhoc_table: &[AdhocBreakpoint],
    use_percent: bool,
) -> f64 {
    if adhoc_table.is_empty() {
        return 0.0;
    }

    let mut sorted = adhoc_table.to_vec();
    sorted.sort_by_key(|bp| bp.month);

    let mut applicable = None;
    for bp in &sorted {
        if bp.month <= period_months {
            applicable = Some(*bp);
        } else {
            break;
        }
    }

    match applicable {
        Some(bp) if use_percent => loan_amount * bp.value / 100.0,
        Some(bp) => bp.value,
        None => 0.0,
    }
}

/// Fixed periodic payment of a mortgage-style annuity.
///
/// Standard annuity formula `PMT = P*r / (1 - (1+r)^-n)` with periodic rate
/// r and term n in periods. Degenerate cases: r = 0 falls back to
/// straight-line P/n; n = 0 means no scheduled amortization at all.
pub fn annuity_payment(principal: f64, periodic_rate: f64, num_payments: u32) -> f64 {
    if num_payments == 0 {
        return 0.0;
    }
    if periodic_rate == 0.0 {
        return principal / num_payments as f64;
    }
    principal * periodic_rate / (1.0 - (1.0 + periodic_rate).powi(-(num_payments as i32)))
}

/// Principal component of a mortgage annuity payment for one period.
///
/// The payment covers interest on the outstanding balance first; whatever
/// remains repays principal, floored at zero (a payment smaller than accrued
/// interest amortizes nothing) and capped to the balance.
pub fn mortgage_principal(payment: f64, periodic_rate: f64, beginning_bal: f64) -> f64 {
    (payment - periodic_rate * beginning_bal)
        .max(0.0)
        .min(beginning_bal)
}
