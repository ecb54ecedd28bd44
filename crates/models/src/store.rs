use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ModelError;

/// Marker stored in `reportedBy` when a reporter leaves the field blank.
pub const ANONYMOUS_REPORTER: &str = "anonymous";

/// Whether a store offers somewhere to sit down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatingStatus {
    Yes,
    No,
    #[default]
    Unknown,
}

impl SeatingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeatingStatus::Yes => "yes",
            SeatingStatus::No => "no",
            SeatingStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SeatingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A convenience store seating entry, as persisted and as returned over HTTP.
///
/// `latitude`/`longitude` are carried through untouched; nothing reads them yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub has_seating: SeatingStatus,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Store {
    /// Decode a raw key-value payload into a `Store`.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ModelError> {
        serde_json::from_value(value).map_err(|e| ModelError::Decode(e.to_string()))
    }

    pub fn to_value(&self) -> Result<serde_json::Value, ModelError> {
        serde_json::to_value(self).map_err(|e| ModelError::Decode(e.to_string()))
    }

    /// Refresh `last_updated`, never moving it backwards.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = now.max(self.last_updated);
    }

    /// Case-insensitive `(name, address)` identity used for duplicate detection.
    pub fn pair_key(&self) -> PairKey {
        pair_key(&self.name, &self.address)
    }
}

/// Trimmed, lowercased `(name, address)`. The two halves are compared independently.
pub type PairKey = (String, String);

pub fn pair_key(name: &str, address: &str) -> PairKey {
    (name.trim().to_lowercase(), address.trim().to_lowercase())
}

/// Body of a seating report (`POST /stores`).
///
/// Every field is optional on the wire so that a missing name or address surfaces as a
/// validation error instead of a body rejection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreReport {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "blank_status_as_none")]
    pub has_seating: Option<SeatingStatus>,
    #[serde(default)]
    pub reporter_name: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl StoreReport {
    /// Trim inputs, drop blank optionals and reject empty name/address.
    pub fn normalize(self) -> Result<NormalizedReport, ModelError> {
        let name = trimmed(self.name)
            .ok_or_else(|| ModelError::Validation("store name and address are required".into()))?;
        let address = trimmed(self.address)
            .ok_or_else(|| ModelError::Validation("store name and address are required".into()))?;
        Ok(NormalizedReport {
            name,
            address,
            has_seating: self.has_seating,
            reporter: trimmed(self.reporter_name),
            notes: trimmed(self.notes),
        })
    }
}

/// A validated report. `None` fields were not provided by the reporter.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedReport {
    pub name: String,
    pub address: String,
    pub has_seating: Option<SeatingStatus>,
    pub reporter: Option<String>,
    pub notes: Option<String>,
}

impl NormalizedReport {
    pub fn pair_key(&self) -> PairKey {
        pair_key(&self.name, &self.address)
    }

    /// Whether `store` describes the same place: name and address each equal, ignoring letter case.
    pub fn matches(&self, store: &Store) -> bool {
        let (name, address) = self.pair_key();
        store.name.trim().to_lowercase() == name && store.address.trim().to_lowercase() == address
    }

    /// Build a brand-new record, filling defaults for anything not reported.
    pub fn into_store(self, id: String, now: DateTime<Utc>) -> Store {
        Store {
            id,
            name: self.name,
            address: self.address,
            has_seating: self.has_seating.unwrap_or_default(),
            last_updated: now,
            reported_by: Some(self.reporter.unwrap_or_else(|| ANONYMOUS_REPORTER.to_string())),
            notes: Some(self.notes.unwrap_or_default()),
            latitude: None,
            longitude: None,
        }
    }

    /// Fold this report into an existing record. Only provided fields overwrite;
    /// name and address keep their first-reported spelling.
    pub fn merge_into(self, mut existing: Store, now: DateTime<Utc>) -> Store {
        if let Some(status) = self.has_seating {
            existing.has_seating = status;
        }
        existing.reported_by = self
            .reporter
            .or_else(|| existing.reported_by.take().filter(|r| !r.trim().is_empty()))
            .or_else(|| Some(ANONYMOUS_REPORTER.to_string()));
        if let Some(notes) = self.notes {
            existing.notes = Some(notes);
        }
        existing.touch(now);
        existing
    }
}

/// Field subset for `PUT /stores/:id`. Provided fields overwrite as-is.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub has_seating: Option<SeatingStatus>,
    #[serde(default)]
    pub reported_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl StorePatch {
    pub fn apply(self, store: &mut Store, now: DateTime<Utc>) {
        if let Some(v) = self.name { store.name = v; }
        if let Some(v) = self.address { store.address = v; }
        if let Some(v) = self.has_seating { store.has_seating = v; }
        if let Some(v) = self.reported_by { store.reported_by = Some(v); }
        if let Some(v) = self.notes { store.notes = Some(v); }
        if let Some(v) = self.latitude { store.latitude = Some(v); }
        if let Some(v) = self.longitude { store.longitude = Some(v); }
        store.touch(now);
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn blank_status_as_none<'de, D>(deserializer: D) -> Result<Option<SeatingStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("yes") => Ok(Some(SeatingStatus::Yes)),
        Some("no") => Ok(Some(SeatingStatus::No)),
        Some("unknown") => Ok(Some(SeatingStatus::Unknown)),
        Some(other) => Err(serde::de::Error::unknown_variant(other, &["yes", "no", "unknown"])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn report(v: serde_json::Value) -> StoreReport {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn normalize_trims_and_requires_name_and_address() {
        let r = report(json!({"name": "  GS25 Test ", "address": " Seoul Gangnam 1 ", "reporterName": "  "}))
            .normalize()
            .unwrap();
        assert_eq!(r.name, "GS25 Test");
        assert_eq!(r.address, "Seoul Gangnam 1");
        assert_eq!(r.reporter, None);

        assert!(matches!(report(json!({"name": "x"})).normalize(), Err(ModelError::Validation(_))));
        assert!(matches!(report(json!({"name": "   ", "address": "a"})).normalize(), Err(ModelError::Validation(_))));
    }

    #[test]
    fn blank_seating_status_is_absent() {
        assert_eq!(report(json!({"hasSeating": ""})).has_seating, None);
        assert_eq!(report(json!({"hasSeating": null})).has_seating, None);
        assert_eq!(report(json!({"hasSeating": "yes"})).has_seating, Some(SeatingStatus::Yes));
        assert!(serde_json::from_value::<StoreReport>(json!({"hasSeating": "maybe"})).is_err());
    }

    #[test]
    fn new_store_gets_defaults() {
        let r = report(json!({"name": "CU", "address": "Mapo"})).normalize().unwrap();
        let s = r.into_store("store_1".into(), at(0));
        assert_eq!(s.has_seating, SeatingStatus::Unknown);
        assert_eq!(s.reported_by.as_deref(), Some(ANONYMOUS_REPORTER));
        assert_eq!(s.notes.as_deref(), Some(""));
        assert_eq!(s.last_updated, at(0));
    }

    #[test]
    fn merge_keeps_fields_not_reported() {
        let first = report(json!({"name": "CU", "address": "Mapo", "notes": "two tables", "reporterName": "kim"}))
            .normalize()
            .unwrap()
            .into_store("store_1".into(), at(0));

        let update = report(json!({"name": "cu", "address": "MAPO", "hasSeating": "no"})).normalize().unwrap();
        assert!(update.matches(&first));
        let merged = update.merge_into(first, at(10));

        assert_eq!(merged.id, "store_1");
        assert_eq!(merged.name, "CU");
        assert_eq!(merged.has_seating, SeatingStatus::No);
        assert_eq!(merged.notes.as_deref(), Some("two tables"));
        assert_eq!(merged.reported_by.as_deref(), Some("kim"));
        assert_eq!(merged.last_updated, at(10));
    }

    #[test]
    fn matching_compares_name_and_address_separately() {
        let stored = report(json!({"name": "A\u{1f}B", "address": "C"}))
            .normalize()
            .unwrap()
            .into_store("store_1".into(), at(0));

        let shifted = report(json!({"name": "A", "address": "B\u{1f}C"})).normalize().unwrap();
        assert!(!shifted.matches(&stored));
        assert_ne!(shifted.pair_key(), stored.pair_key());
    }

    #[test]
    fn merge_falls_back_to_anonymous_for_blank_existing_reporter() {
        let mut existing = report(json!({"name": "a", "address": "b"})).normalize().unwrap().into_store("id".into(), at(0));
        existing.reported_by = Some(String::new());
        let merged = report(json!({"name": "a", "address": "b"})).normalize().unwrap().merge_into(existing, at(1));
        assert_eq!(merged.reported_by.as_deref(), Some(ANONYMOUS_REPORTER));
    }

    #[test]
    fn touch_never_moves_backwards() {
        let mut s = report(json!({"name": "a", "address": "b"})).normalize().unwrap().into_store("id".into(), at(100));
        s.touch(at(100) - Duration::seconds(5));
        assert_eq!(s.last_updated, at(100));
        s.touch(at(200));
        assert_eq!(s.last_updated, at(200));
    }

    #[test]
    fn patch_overwrites_only_provided_fields() {
        let mut s = report(json!({"name": "a", "address": "b", "notes": "n"})).normalize().unwrap().into_store("id".into(), at(0));
        let patch: StorePatch = serde_json::from_value(json!({"hasSeating": "yes", "id": "ignored"})).unwrap();
        patch.apply(&mut s, at(5));
        assert_eq!(s.id, "id");
        assert_eq!(s.has_seating, SeatingStatus::Yes);
        assert_eq!(s.name, "a");
        assert_eq!(s.notes.as_deref(), Some("n"));
        assert_eq!(s.last_updated, at(5));
    }

    #[test]
    fn decodes_records_written_by_other_clients() {
        let s = Store::from_value(json!({
            "id": "sample_4",
            "name": "emart24",
            "address": "Yeoksam",
            "lastUpdated": "2024-05-01T09:30:00.000Z",
            "reportedBy": ""
        }))
        .unwrap();
        assert_eq!(s.has_seating, SeatingStatus::Unknown);
        assert_eq!(s.reported_by.as_deref(), Some(""));
        assert!(Store::from_value(json!({"id": "x"})).is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let s = report(json!({"name": "a", "address": "b"})).normalize().unwrap().into_store("id".into(), at(0));
        let v = s.to_value().unwrap();
        assert_eq!(v["hasSeating"], "unknown");
        assert_eq!(v["reportedBy"], "anonymous");
        assert!(v.get("lastUpdated").is_some());
        assert!(v.get("latitude").is_none());
    }
}
