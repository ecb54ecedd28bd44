//! Domain types for the convenience store seating registry.
//! - `store`: the persisted record, report and patch payloads.
//! - `search`: the name/address substring filter used by list views.

pub mod errors;
pub mod search;
pub mod store;

pub use store::{NormalizedReport, PairKey, SeatingStatus, Store, StorePatch, StoreReport, ANONYMOUS_REPORTER};
