//! Installment plans for fixed-installment credit purchases.
//!
//! The capital is split evenly across the installments. The first installment
//! carries no interest, the second bills the interest of the first two months,
//! and every later one bills a month of interest on the outstanding balance.

pub mod error;
pub mod format;
pub mod plan;

pub use error::SimulatorError;
pub use format::NumberFormat;
pub use plan::{
    compute, compute_with, CreditPlan, CreditTerms, Installment, Rounding, MAX_INSTALLMENTS,
};
