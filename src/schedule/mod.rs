//! Amortization schedule construction

mod amortization;
mod builder;
mod dates;

pub use amortization::{adhoc_payment, annuity_payment, mortgage_principal};
pub use builder::{build_schedule, Schedule, ScheduleRow};
pub use dates::{days_between, month_offset, period_date};
