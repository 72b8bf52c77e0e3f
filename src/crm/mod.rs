/// CRM domain: record types, validation, per-tenant SQLite storage,
/// pipeline conversions and the dashboard summary

pub mod dashboard;
pub mod error;
pub mod pipeline;
pub mod schema;
pub mod storage;
pub mod types;
pub mod validation;

pub use error::{StoreError, StoreResult, ValidationError};
pub use types::*;
