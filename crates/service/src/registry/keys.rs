use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Namespace for store records. Enumeration is a prefix scan over this.
pub const STORE_KEY_PREFIX: &str = "store:";

pub fn store_key(id: &str) -> String {
    format!("{STORE_KEY_PREFIX}{id}")
}

/// Fresh record id: creation millis followed by a random v4 uuid, so ids sort roughly by
/// age and two creations in the same millisecond still differ.
pub fn new_store_id(now: DateTime<Utc>) -> String {
    format!("store_{}_{}", now.timestamp_millis(), Uuid::new_v4().simple())
}
