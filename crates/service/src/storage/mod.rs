//! Storage abstractions for service layer
//!
//! The registry only ever talks to [`KvStore`]: a flat string-keyed map of JSON values
//! with exact lookup, upsert and prefix scan. Backends know nothing about the records
//! they hold.

pub mod json_map_store;
pub mod kv;
pub mod memory;

pub use json_map_store::JsonMapStore;
pub use kv::{KvEntry, KvStore};
pub use memory::MemoryKvStore;
