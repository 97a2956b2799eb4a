//! Amortization schedule construction
//!
//! Builds the full period-by-period schedule from loan terms: running
//! balance, Actual/360 interest accrual, commitment fees on the undrawn
//! commitment and scheduled principal repayments.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::amortization::{adhoc_payment, annuity_payment, mortgage_principal};
use super::dates::{days_between, month_offset, period_date};
use crate::terms::{AmortizationProfile, LoanTerms};

/// Monetary intermediates are rounded to 6 decimal places before being
/// carried into the next period, which keeps the running balance stable
/// across long schedules.
fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

/// One period of the amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub period: u32,
    pub date: NaiveDate,
    /// Actual days since the prior period's date (0 for period 0)
    pub days: i64,
    pub beginning_bal: f64,
    pub draws: f64,
    pub amortization: f64,
    pub interest: f64,
    pub upfront_fee: f64,
    pub commitment_fee: f64,
    pub ending_bal: f64,
}

/// Full amortization schedule: `num_periods + 1` rows, period 0 is the
/// disbursement row.
///
/// Immutable once built; every downstream consumer (cash flows, WAL,
/// validation) reads the same materialized rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn total_draws(&self) -> f64 {
        self.rows.iter().map(|r| r.draws).sum()
    }

    pub fn total_amortization(&self) -> f64 {
        self.rows.iter().map(|r| r.amortization).sum()
    }

    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.ending_bal).unwrap_or(0.0)
    }
}

/// Build the full schedule for one facility.
///
/// Period 0 is the disbursement row: single lump draw of the loan amount,
/// upfront fee charged, no accruals. Periods 1..=num_periods follow the
/// uniform transition rule; the final period forces full payoff for the
/// bullet and mortgage profiles.
pub fn build_schedule(terms: &LoanTerms) -> Schedule {
    let freq_months = terms.frequency.months();

    // Mortgage profile: fixed annuity payment precomputed over the
    // amortization term, which is independent of the facility tenor.
    let mortgage_periodic_rate = terms.mortgage_rate / terms.frequency.periods_per_year() as f64;
    let mortgage_payment = annuity_payment(
        terms.loan_amount,
        mortgage_periodic_rate,
        terms.mortgage_amort_years * terms.frequency.periods_per_year(),
    );

    let mut rows = Vec::with_capacity(terms.num_periods as usize + 1);
    let mut balance = 0.0;

    for p in 0..=terms.num_periods {
        let date = period_date(terms.disbursement_date, p, freq_months);

        if p == 0 {
            let row = ScheduleRow {
                period: 0,
                date,
                days: 0,
                beginning_bal: 0.0,
                draws: terms.loan_amount,
                amortization: 0.0,
                interest: 0.0,
                upfront_fee: round6(terms.loan_amount * terms.upfront_fee_rate),
                commitment_fee: 0.0,
                ending_bal: terms.loan_amount,
            };
            balance = row.ending_bal;
            rows.push(row);
            continue;
        }

        let prev_date = period_date(terms.disbursement_date, p - 1, freq_months);
        let days = days_between(prev_date, date);
        let year_frac = days as f64 / 360.0;
        let beginning_bal = balance;

        // Margin: draw-phase vs post-draw, with the optional step-up added
        // on top from step_up_period onward.
        let mut margin = if p <= terms.draw_period {
            terms.margin_draw
        } else {
            terms.margin_after
        };
        if terms.step_up_period > 0 && p >= terms.step_up_period {
            margin += terms.step_up;
        }

        // Actual/360 accrual, only through the grace window
        let interest = if p <= terms.grace_periods && beginning_bal > 0.0 {
            round6(margin * beginning_bal * year_frac)
        } else {
            0.0
        };

        // Commitment fee on the undrawn commitment during the draw phase
        let commitment_fee = if p <= terms.draw_period {
            let undrawn = (terms.loan_amount - beginning_bal).max(0.0);
            round6(undrawn * terms.commitment_fee_rate * year_frac)
        } else {
            0.0
        };

        let amortization = round6(scheduled_amortization(
            terms,
            p,
            date,
            beginning_bal,
            mortgage_payment,
            mortgage_periodic_rate,
        ));

        // No draws after period 0 in this model
        let ending_bal = round6((beginning_bal - amortization).max(0.0));
        balance = ending_bal;

        rows.push(ScheduleRow {
            period: p,
            date,
            days,
            beginning_bal,
            draws: 0.0,
            amortization,
            interest,
            upfront_fee: 0.0,
            commitment_fee,
            ending_bal,
        });
    }

    Schedule { rows }
}

/// Scheduled principal repayment for period p, capped to the outstanding
/// balance. Bullet and mortgage profiles clear the full residual in the
/// final period.
fn scheduled_amortization(
    terms: &LoanTerms,
    p: u32,
    date: NaiveDate,
    beginning_bal: f64,
    mortgage_payment: f64,
    mortgage_periodic_rate: f64,
) -> f64 {
    match terms.amortization_profile {
        AmortizationProfile::Bullet => {
            if p == terms.num_periods {
                beginning_bal
            } else {
                0.0
            }
        }
        AmortizationProfile::AdHoc => {
            // The ad-hoc table keys on calendar month offset from
            // disbursement, not exact day counts.
            let offset = month_offset(terms.disbursement_date, date);
            adhoc_payment(
                terms.loan_amount,
                offset,
                &terms.adhoc_table,
                terms.adhoc_use_percent,
            )
            .min(beginning_bal)
        }
        AmortizationProfile::Mortgage => {
            if p == terms.num_periods {
                // Clears any residual left by the annuity formula
                beginning_bal
            } else if p > terms.draw_period {
                mortgage_principal(mortgage_payment, mortgage_periodic_rate, beginning_bal)
            } else {
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terms::{AdhocBreakpoint, Frequency};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bullet_terms() -> LoanTerms {
        LoanTerms {
            loan_amount: 100.0,
            num_periods: 4,
            draw_period: 0,
            grace_periods: 4,
            frequency: Frequency::Quarterly,
            margin_draw: 0.04,
            margin_after: 0.04,
            step_up: 0.0,
            step_up_period: 0,
            upfront_fee_rate: 0.0,
            commitment_fee_rate: 0.0,
            disbursement_date: date(2024, 1, 1),
            amortization_profile: AmortizationProfile::Bullet,
            adhoc_table: Vec::new(),
            adhoc_use_percent: true,
            mortgage_rate: 0.0,
            mortgage_amort_years: 0,
        }
    }

    #[test]
    fn test_bullet_schedule_shape() {
        let schedule = build_schedule(&bullet_terms());
        assert_eq!(schedule.rows.len(), 5);

        let row0 = &schedule.rows[0];
        assert_eq!(row0.period, 0);
        assert_eq!(row0.days, 0);
        assert_eq!(row0.beginning_bal, 0.0);
        assert_eq!(row0.draws, 100.0);
        assert_eq!(row0.ending_bal, 100.0);

        for row in &schedule.rows[1..4] {
            assert_eq!(row.amortization, 0.0);
            assert_eq!(row.ending_bal, 100.0);
        }

        let last = &schedule.rows[4];
        assert_eq!(last.amortization, 100.0);
        assert_eq!(last.ending_bal, 0.0);
        assert_eq!(last.date, date(2025, 1, 1));
    }

    #[test]
    fn test_bullet_interest_actual_360() {
        let schedule = build_schedule(&bullet_terms());
        // Q1 2024: Jan 1 -> Apr 1 is 91 days
        assert_eq!(schedule.rows[1].days, 91);
        assert_relative_eq!(
            schedule.rows[1].interest,
            0.04 * 100.0 * 91.0 / 360.0,
            epsilon = 1e-6
        );
        // Q4: Oct 1 -> Jan 1 is 92 days
        assert_eq!(schedule.rows[4].days, 92);
        assert_relative_eq!(
            schedule.rows[4].interest,
            0.04 * 100.0 * 92.0 / 360.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_interest_stops_after_grace() {
        let mut terms = bullet_terms();
        terms.grace_periods = 2;
        let schedule = build_schedule(&terms);
        assert!(schedule.rows[1].interest > 0.0);
        assert!(schedule.rows[2].interest > 0.0);
        assert_eq!(schedule.rows[3].interest, 0.0);
        assert_eq!(schedule.rows[4].interest, 0.0);
    }

    #[test]
    fn test_step_up_margin_is_additive() {
        let mut terms = bullet_terms();
        terms.step_up = 0.01;
        terms.step_up_period = 3;
        let schedule = build_schedule(&terms);
        // Before the step-up: 4% flat
        assert_relative_eq!(
            schedule.rows[1].interest,
            0.04 * 100.0 * 91.0 / 360.0,
            epsilon = 1e-6
        );
        // From period 3: 4% + 1%
        assert_relative_eq!(
            schedule.rows[3].interest,
            0.05 * 100.0 * 92.0 / 360.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_commitment_fee_on_undrawn_commitment() {
        let mut terms = bullet_terms();
        terms.loan_amount = 1000.0;
        terms.draw_period = 2;
        terms.commitment_fee_rate = 0.01;
        terms.amortization_profile = AmortizationProfile::AdHoc;
        terms.adhoc_use_percent = false;
        terms.adhoc_table = vec![AdhocBreakpoint {
            month: 3,
            value: 100.0,
        }];
        let schedule = build_schedule(&terms);

        // Fully drawn through period 1: no undrawn commitment yet
        assert_eq!(schedule.rows[1].commitment_fee, 0.0);
        // Period 2: 100 repaid, commitment of 100 is undrawn for 91 days
        assert_relative_eq!(
            schedule.rows[2].commitment_fee,
            100.0 * 0.01 * 91.0 / 360.0,
            epsilon = 1e-6
        );
        // Past draw_period the fee stops even though the gap remains
        assert_eq!(schedule.rows[3].commitment_fee, 0.0);
    }

    #[test]
    fn test_upfront_fee_at_period_zero_only() {
        let mut terms = bullet_terms();
        terms.upfront_fee_rate = 0.015;
        let schedule = build_schedule(&terms);
        assert_relative_eq!(schedule.rows[0].upfront_fee, 1.5, epsilon = 1e-9);
        for row in &schedule.rows[1..] {
            assert_eq!(row.upfront_fee, 0.0);
        }
    }

    #[test]
    fn test_adhoc_schedule() {
        let mut terms = bullet_terms();
        terms.loan_amount = 1000.0;
        terms.amortization_profile = AmortizationProfile::AdHoc;
        terms.adhoc_use_percent = false;
        terms.adhoc_table = vec![
            AdhocBreakpoint {
                month: 6,
                value: 50.0,
            },
            AdhocBreakpoint {
                month: 12,
                value: 100.0,
            },
        ];
        let schedule = build_schedule(&terms);

        // Quarterly offsets 3, 6, 9, 12 -> payments 0, 50, 50, 100
        assert_eq!(schedule.rows[1].amortization, 0.0);
        assert_eq!(schedule.rows[2].amortization, 50.0);
        assert_eq!(schedule.rows[3].amortization, 50.0);
        assert_eq!(schedule.rows[4].amortization, 100.0);
        assert_eq!(schedule.rows[4].ending_bal, 800.0);
    }

    #[test]
    fn test_adhoc_payment_capped_to_balance() {
        let mut terms = bullet_terms();
        terms.loan_amount = 100.0;
        terms.amortization_profile = AmortizationProfile::AdHoc;
        terms.adhoc_use_percent = false;
        terms.adhoc_table = vec![AdhocBreakpoint {
            month: 3,
            value: 60.0,
        }];
        let schedule = build_schedule(&terms);

        assert_eq!(schedule.rows[1].amortization, 60.0);
        // Only 40 left to repay; balance never goes negative
        assert_eq!(schedule.rows[2].amortization, 40.0);
        assert_eq!(schedule.rows[2].ending_bal, 0.0);
        assert_eq!(schedule.rows[3].amortization, 0.0);
        for row in &schedule.rows {
            assert!(row.ending_bal >= 0.0);
        }
    }

    #[test]
    fn test_mortgage_zero_rate_straight_line() {
        let mut terms = bullet_terms();
        terms.loan_amount = 120.0;
        terms.num_periods = 12;
        terms.grace_periods = 12;
        terms.frequency = Frequency::Monthly;
        terms.amortization_profile = AmortizationProfile::Mortgage;
        terms.mortgage_rate = 0.0;
        terms.mortgage_amort_years = 1;
        let schedule = build_schedule(&terms);

        // PMT = 120 / 12 = 10 per month, final period clears the residual
        for row in &schedule.rows[1..12] {
            assert_relative_eq!(row.amortization, 10.0, epsilon = 1e-6);
        }
        assert_relative_eq!(schedule.rows[12].amortization, 10.0, epsilon = 1e-6);
        assert_eq!(schedule.rows[12].ending_bal, 0.0);
    }

    #[test]
    fn test_mortgage_final_period_clears_residual() {
        let mut terms = bullet_terms();
        terms.loan_amount = 100_000.0;
        terms.num_periods = 8;
        terms.grace_periods = 8;
        terms.amortization_profile = AmortizationProfile::Mortgage;
        terms.mortgage_rate = 0.06;
        // 30-year amortization over an 8-quarter tenor leaves a large
        // residual for the final period
        terms.mortgage_amort_years = 30;
        let schedule = build_schedule(&terms);

        let last = schedule.rows.last().unwrap();
        assert_eq!(last.ending_bal, 0.0);
        assert!(last.amortization > 90_000.0);
        // Interim principal is small but positive
        for row in &schedule.rows[1..8] {
            assert!(row.amortization > 0.0);
            assert!(row.amortization < 2_000.0);
        }
    }

    #[test]
    fn test_mortgage_no_amortization_during_draw_phase() {
        let mut terms = bullet_terms();
        terms.num_periods = 8;
        terms.grace_periods = 8;
        terms.draw_period = 4;
        terms.amortization_profile = AmortizationProfile::Mortgage;
        terms.mortgage_rate = 0.05;
        terms.mortgage_amort_years = 2;
        let schedule = build_schedule(&terms);

        for row in &schedule.rows[1..=4] {
            assert_eq!(row.amortization, 0.0);
        }
        assert!(schedule.rows[5].amortization > 0.0);
    }

    #[test]
    fn test_zero_length_schedule() {
        let mut terms = bullet_terms();
        terms.num_periods = 0;
        let schedule = build_schedule(&terms);
        assert_eq!(schedule.rows.len(), 1);
        assert_eq!(schedule.rows[0].ending_bal, 100.0);
        assert_eq!(schedule.total_amortization(), 0.0);
    }

    #[test]
    fn test_balance_never_negative() {
        let mut terms = bullet_terms();
        terms.amortization_profile = AmortizationProfile::AdHoc;
        terms.adhoc_use_percent = true;
        // 60% per quarter overshoots the balance quickly
        terms.adhoc_table = vec![AdhocBreakpoint {
            month: 3,
            value: 60.0,
        }];
        let schedule = build_schedule(&terms);
        for row in &schedule.rows {
            assert!(row.ending_bal >= 0.0);
        }
        assert_relative_eq!(schedule.total_amortization(), 100.0, epsilon = 1e-6);
    }
}
