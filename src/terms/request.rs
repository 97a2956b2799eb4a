//! Request parsing and validation
//!
//! The delivery layer (CLI today, a web form originally) hands the engine a
//! raw JSON parameter object assembled from user input. This module turns it
//! into validated `LoanTerms` or a structured error; the engine never sees a
//! partially populated input.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::data::{AdhocBreakpoint, AmortizationProfile, Frequency, LoanTerms};

/// Input validation failure. Raised conditions are converted into a failure
/// response at the request boundary; no partial results escape.
#[derive(Debug, Error)]
pub enum TermsError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {value}")]
    InvalidEnum { field: &'static str, value: String },

    #[error("invalid disbursement date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Raw calculation request as posted by the form: every field optional,
/// enums and the date still strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculationRequest {
    pub loan_amount: Option<f64>,
    pub num_periods: Option<u32>,
    pub draw_period: Option<u32>,
    pub grace_periods: Option<u32>,
    pub frequency: Option<String>,
    pub margin_draw: Option<f64>,
    pub margin_after: Option<f64>,
    pub step_up: Option<f64>,
    pub step_up_period: Option<u32>,
    pub upfront_fee_rate: Option<f64>,
    pub commitment_fee_rate: Option<f64>,
    pub disbursement_date: Option<String>,
    pub amortization_profile: Option<String>,
    #[serde(default)]
    pub adhoc_table: Vec<AdhocBreakpoint>,
    pub adhoc_use_percent: Option<bool>,
    pub mortgage_rate: Option<f64>,
    pub mortgage_amort_years: Option<u32>,
}

impl CalculationRequest {
    /// Validate the request and convert it into engine-ready terms.
    ///
    /// Optional knobs take their documented defaults: `grace_periods`
    /// defaults to the full tenor, fee rates and step-up to zero,
    /// `adhoc_use_percent` to true.
    pub fn into_terms(self) -> Result<LoanTerms, TermsError> {
        let loan_amount = self
            .loan_amount
            .ok_or(TermsError::MissingField("loan_amount"))?;
        let num_periods = self
            .num_periods
            .ok_or(TermsError::MissingField("num_periods"))?;
        let draw_period = self
            .draw_period
            .ok_or(TermsError::MissingField("draw_period"))?;
        let margin_draw = self
            .margin_draw
            .ok_or(TermsError::MissingField("margin_draw"))?;
        let margin_after = self
            .margin_after
            .ok_or(TermsError::MissingField("margin_after"))?;

        let frequency = match self.frequency.as_deref() {
            None => return Err(TermsError::MissingField("frequency")),
            Some("Monthly") => Frequency::Monthly,
            Some("Quarterly") => Frequency::Quarterly,
            Some("Semiannually") => Frequency::Semiannually,
            Some(other) => {
                return Err(TermsError::InvalidEnum {
                    field: "frequency",
                    value: other.to_string(),
                })
            }
        };

        let amortization_profile = match self.amortization_profile.as_deref() {
            None => return Err(TermsError::MissingField("amortization_profile")),
            Some("Bullet") => AmortizationProfile::Bullet,
            Some("Ad-hoc") => AmortizationProfile::AdHoc,
            Some("Mortgage") => AmortizationProfile::Mortgage,
            Some(other) => {
                return Err(TermsError::InvalidEnum {
                    field: "amortization_profile",
                    value: other.to_string(),
                })
            }
        };

        let date_str = self
            .disbursement_date
            .ok_or(TermsError::MissingField("disbursement_date"))?;
        let disbursement_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|_| TermsError::InvalidDate(date_str))?;

        Ok(LoanTerms {
            loan_amount,
            num_periods,
            draw_period,
            grace_periods: self.grace_periods.unwrap_or(num_periods),
            frequency,
            margin_draw,
            margin_after,
            step_up: self.step_up.unwrap_or(0.0),
            step_up_period: self.step_up_period.unwrap_or(0),
            upfront_fee_rate: self.upfront_fee_rate.unwrap_or(0.0),
            commitment_fee_rate: self.commitment_fee_rate.unwrap_or(0.0),
            disbursement_date,
            amortization_profile,
            adhoc_table: self.adhoc_table,
            adhoc_use_percent: self.adhoc_use_percent.unwrap_or(true),
            mortgage_rate: self.mortgage_rate.unwrap_or(0.0),
            mortgage_amort_years: self.mortgage_amort_years.unwrap_or(0),
        })
    }
}
