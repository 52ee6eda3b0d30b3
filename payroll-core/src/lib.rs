pub mod calculations;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

pub use calculations::{
    CompensationCalculator, KPI_GAP_TOLERANCE, KpiCoefficientCalculator, compute_compensation,
    compute_kpi,
};
pub use error::InvalidInputError;
pub use models::*;
pub use service::{PayrollService, ServiceError};
pub use store::{PayrollStore, StoreError};
