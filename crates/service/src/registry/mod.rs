//! Store registry: create-or-merge, list, read and patch of `Store` records on top of a
//! [`KvStore`](crate::storage::KvStore).

pub mod keys;
pub mod seed;
pub mod service;

pub use keys::{new_store_id, store_key, STORE_KEY_PREFIX};
pub use service::{ReportOutcome, StoreRegistry};
