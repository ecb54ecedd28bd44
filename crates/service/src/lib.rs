//! Service layer for the convenience store seating registry.
//! - `storage`: the key-value capability and its backends.
//! - `registry`: create-or-merge, list, read, update and sample seeding of stores.
//! - Errors are reported through [`errors::ServiceError`].

pub mod errors;
pub mod registry;
pub mod runtime;
pub mod storage;

pub use registry::{ReportOutcome, StoreRegistry};
