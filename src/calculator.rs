//! One-shot calculation pipeline
//!
//! Builds the schedule once, then feeds the same immutable rows to the
//! cash-flow/yield, WAL and validation passes. Request-scoped and pure: no
//! state survives between invocations.

use crate::analytics::{
    validate, weighted_average_life, yield_components, CashflowSeries, ValidationReport,
    YieldResult,
};
use crate::schedule::{build_schedule, Schedule};
use crate::terms::LoanTerms;

/// Complete output of one engine invocation
#[derive(Debug, Clone)]
pub struct CalculationResult {
    pub schedule: Schedule,
    pub yield_result: YieldResult,
    pub wal: f64,
    pub validation: ValidationReport,
}

/// Run the full pipeline for one set of terms.
pub fn calculate(terms: &LoanTerms) -> CalculationResult {
    let schedule = build_schedule(terms);

    let series = CashflowSeries::from_schedule(&schedule);
    let yield_result = yield_components(&series, terms.frequency);
    let wal = weighted_average_life(&schedule, terms.frequency.months());
    let validation = validate(&schedule, terms.loan_amount);

    CalculationResult {
        schedule,
        yield_result,
        wal,
        validation,
    }
}
