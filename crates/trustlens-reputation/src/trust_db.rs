// crates/trustlens-reputation/src/trust_db.rs
//
// The static trust database: domain key -> base TrustRecord.
//
// Loaded once at startup and never mutated afterwards. The value is built
// explicitly and shared by `Arc` with the resolver and merge service.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use trustlens_core::error::TrustLensError;
use trustlens_core::record::TrustRecord;

/// Read-only mapping from domain key to base trust record.
#[derive(Debug, Clone, Default)]
pub struct TrustStore {
    records: BTreeMap<String, TrustRecord>,
}

impl TrustStore {
    /// An empty store, used when the database failed to load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a store from already-validated records.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, TrustRecord)>,
    {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Parse a JSON document of the form `{ "<domain>": { ...TrustRecord } }`.
    ///
    /// Every record is range-checked; a single bad record fails the load.
    pub fn from_json_str(json: &str) -> Result<Self, TrustLensError> {
        let records: BTreeMap<String, TrustRecord> = serde_json::from_str(json)
            .map_err(|e| TrustLensError::Load(format!("malformed trust database: {}", e)))?;

        for (domain, record) in &records {
            record
                .validate()
                .map_err(|e| TrustLensError::Load(format!("bad record for {}: {}", domain, e)))?;
        }

        Ok(Self { records })
    }

    /// Load the trust database from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrustLensError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            TrustLensError::Load(format!("cannot read {}: {}", path.display(), e))
        })?;
        let store = Self::from_json_str(&contents)?;
        tracing::info!(
            "Loaded trust database from {} ({} domains)",
            path.display(),
            store.len()
        );
        Ok(store)
    }

    /// Look up the base record for a domain key.
    pub fn get(&self, key: &str) -> Option<&TrustRecord> {
        self.records.get(key)
    }

    /// Iterate over domain keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DB: &str = r#"{
        "example-news.com": {
            "name": "Example News", "trustScore": 85, "reputation": 88,
            "accuracy": 84, "bias": 80, "transparency": 90,
            "userEngagement": 70, "totalReviews": 2500
        },
        "default": {
            "name": "Unknown Source", "trustScore": null, "reputation": 0,
            "accuracy": 0, "bias": 0, "transparency": 0,
            "userEngagement": 0, "totalReviews": 0
        }
    }"#;

    #[test]
    fn parses_database() {
        let store = TrustStore::from_json_str(DB).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("example-news.com").unwrap().trust_score, Some(85));
        assert_eq!(store.get("default").unwrap().trust_score, None);
        assert!(store.get("missing.org").is_none());
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["default", "example-news.com"]);
    }

    #[test]
    fn malformed_json_is_load_error() {
        let err = TrustStore::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, TrustLensError::Load(_)));
    }

    #[test]
    fn out_of_range_record_is_load_error() {
        let json = r#"{"bad.com": {"name": "Bad", "trustScore": 150, "reputation": 0,
            "accuracy": 0, "bias": 0, "transparency": 0, "userEngagement": 0,
            "totalReviews": 0}}"#;
        let err = TrustStore::from_json_str(json).unwrap_err();
        assert!(matches!(err, TrustLensError::Load(_)));
    }

    #[test]
    fn missing_file_is_load_error() {
        let path = std::env::temp_dir().join("trustlens_definitely_missing_db.json");
        let err = TrustStore::load(&path).unwrap_err();
        assert!(matches!(err, TrustLensError::Load(_)));
    }

    #[test]
    fn empty_store_has_no_keys() {
        let store = TrustStore::empty();
        assert!(store.is_empty());
        assert_eq!(store.keys().count(), 0);
    }
}
