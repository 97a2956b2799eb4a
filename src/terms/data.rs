//! Loan terms data structures matching the calculator's input form

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payment frequency of the facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    Quarterly,
    Semiannually,
}

impl Frequency {
    /// Calendar months between consecutive periods
    pub fn months(&self) -> u32 {
        match self {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::Semiannually => 6,
        }
    }

    /// Periods per year, used as the nominal annualization multiplier
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Monthly => 12,
            Frequency::Quarterly => 4,
            Frequency::Semiannually => 2,
        }
    }

    /// Get the string representation matching the input form
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Semiannually => "Semiannually",
        }
    }
}

/// Amortization profile of the facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationProfile {
    /// Full repayment at maturity
    Bullet,
    /// Schedule-driven partial repayments
    #[serde(rename = "Ad-hoc")]
    AdHoc,
    /// Fixed-annuity-style repayments
    Mortgage,
}

/// One breakpoint of an ad-hoc amortization table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdhocBreakpoint {
    /// Month offset from the disbursement date
    pub month: i32,
    /// Payment value: percent of loan amount or currency amount,
    /// per `adhoc_use_percent`
    pub value: f64,
}

/// Complete, validated commercial terms for a single credit facility.
///
/// Immutable input to the calculation pipeline; one instance per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Facility amount, drawn as a single lump at period 0
    pub loan_amount: f64,

    /// Facility tenor in payment periods
    pub num_periods: u32,

    /// Last period of the draw phase: commitment fees and the draw margin
    /// apply through this period
    pub draw_period: u32,

    /// Last period in which interest accrues
    pub grace_periods: u32,

    /// Payment frequency
    pub frequency: Frequency,

    /// Margin during the draw phase (decimal, e.g. 0.0158)
    pub margin_draw: f64,

    /// Margin after the draw phase
    pub margin_after: f64,

    /// Additive margin step-up applied from `step_up_period` onward
    pub step_up: f64,

    /// First period the step-up applies (0 disables it)
    pub step_up_period: u32,

    /// Upfront fee rate on the loan amount, charged at period 0
    pub upfront_fee_rate: f64,

    /// Commitment fee rate on the undrawn commitment during the draw phase
    pub commitment_fee_rate: f64,

    /// Disbursement date; all period dates step forward from here
    pub disbursement_date: NaiveDate,

    /// Amortization profile
    pub amortization_profile: AmortizationProfile,

    /// Ad-hoc amortization table (Ad-hoc profile only)
    pub adhoc_table: Vec<AdhocBreakpoint>,

    /// Whether ad-hoc values are percentages of the loan amount
    pub adhoc_use_percent: bool,

    /// Annual mortgage rate for the annuity payment (Mortgage profile only)
    pub mortgage_rate: f64,

    /// Amortization term in years for the annuity payment (Mortgage profile only)
    pub mortgage_amort_years: u32,
}
