//! Payslip and KPI calculators.
//!
//! Both calculators are pure: they read only their input and return a fresh
//! result, so they can be called from any number of threads at once.

pub mod common;
pub mod compensation;
pub mod kpi;

pub use compensation::{CompensationCalculator, compute_compensation, progressive_tax};
pub use kpi::{KPI_GAP_TOLERANCE, KpiCoefficientCalculator, compute_kpi};
