//! Loan terms: input data model and request validation

mod data;
mod request;

pub use data::{AdhocBreakpoint, AmortizationProfile, Frequency, LoanTerms};
pub use request::{CalculationRequest, TermsError};
