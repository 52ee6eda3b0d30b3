//! File-backed inputs and outputs for the payroll engine.
//!
//! Loads salary and KPI score sheets from CSV, keeps them in an in-memory
//! [`PayrollStore`](payroll_core::PayrollStore), and writes computed records
//! back out as CSV or JSON.

pub mod config;
pub mod error;
pub mod kpi_loader;
pub mod memory_store;
pub mod report;
pub mod sheet_loader;

pub use config::{AppConfig, ConfigError, OutputFormat};
pub use error::LoadError;
pub use kpi_loader::KpiSubmission;
pub use memory_store::MemoryStore;
pub use report::{ReportError, write_kpi_results, write_payslips};
