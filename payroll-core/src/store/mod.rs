pub mod repository;

pub use repository::{PayrollStore, StoreError};
