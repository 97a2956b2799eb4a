//! All-In Margin Calculator - amortization and yield engine for credit facilities
//!
//! This library provides:
//! - Period-by-period amortization schedules (bullet, ad-hoc and mortgage profiles)
//! - Actual/360 interest accrual with draw/post-draw margins and step-ups
//! - Upfront and commitment fee modelling
//! - IRR component decomposition (spread, upfront impact, commitment impact, all-in margin)
//! - Weighted average life and schedule validation

pub mod analytics;
pub mod calculator;
pub mod report;
pub mod schedule;
pub mod terms;

// Re-export commonly used types
pub use analytics::{ValidationReport, YieldResult};
pub use calculator::{calculate, CalculationResult};
pub use report::{CalculationResponse, FailureResponse};
pub use schedule::{build_schedule, Schedule, ScheduleRow};
pub use terms::{AmortizationProfile, CalculationRequest, Frequency, LoanTerms, TermsError};
