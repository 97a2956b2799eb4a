//! Downstream consumers of the built schedule: cash flows, yield, WAL and
//! validation. All four read the same immutable `Schedule`.

mod cashflows;
mod irr;
mod validation;
mod wal;

pub use cashflows::CashflowSeries;
pub use irr::{annualized_irr, yield_components, YieldResult};
pub use validation::{validate, DrawStatus, ValidationReport};
pub use wal::weighted_average_life;
