// crates/trustlens-store/src/rocks.rs
//
// RocksDB-backed persistent storage for review aggregates.
//
// Key format:
//   - `aggregate:{domain}` -> JSON-serialized DomainAggregate (camelCase)
//
// RocksDB holds an exclusive lock on its directory, so every writer that
// shares this database goes through one `RocksStore`. Compare-and-swap is
// made atomic by a process-wide write mutex around read-compare-put.

use std::sync::Mutex;

use async_trait::async_trait;
use rocksdb::{DBWithThreadMode, MultiThreaded, Options};

use trustlens_core::error::TrustLensError;
use trustlens_core::review::DomainAggregate;
use trustlens_core::traits::AggregateStore;

const AGGREGATE_PREFIX: &str = "aggregate:";

/// RocksDB wrapper implementing the `AggregateStore` trait.
#[derive(Debug)]
pub struct RocksStore {
    db: DBWithThreadMode<MultiThreaded>,
    write_lock: Mutex<()>,
}

impl RocksStore {
    /// Open a RocksDB database at the given filesystem path.
    ///
    /// Creates the database directory if it does not exist.
    pub fn open(path: &str) -> Result<Self, TrustLensError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        let db = DBWithThreadMode::<MultiThreaded>::open(&opts, path).map_err(|e| {
            TrustLensError::Storage(format!("Failed to open RocksDB at {}: {}", path, e))
        })?;

        Ok(Self {
            db,
            write_lock: Mutex::new(()),
        })
    }

    /// Build the primary key for a domain: `aggregate:{domain}`.
    fn aggregate_key(domain: &str) -> Vec<u8> {
        format!("{}{}", AGGREGATE_PREFIX, domain).into_bytes()
    }

    /// Get raw bytes from RocksDB, mapping errors to TrustLensError::Storage.
    fn get_raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, TrustLensError> {
        self.db
            .get(key)
            .map_err(|e| TrustLensError::Storage(format!("RocksDB get failed: {}", e)))
    }

    /// Put raw bytes into RocksDB, mapping errors to TrustLensError::Storage.
    fn put_raw(&self, key: &[u8], value: &[u8]) -> Result<(), TrustLensError> {
        self.db
            .put(key, value)
            .map_err(|e| TrustLensError::Storage(format!("RocksDB put failed: {}", e)))
    }

    /// Read and decode the aggregate for a domain without going through the async trait.
    pub fn get_aggregate_sync(&self, domain: &str) -> Result<Option<DomainAggregate>, TrustLensError> {
        match self.get_raw(&Self::aggregate_key(domain))? {
            Some(bytes) => {
                let aggregate: DomainAggregate = serde_json::from_slice(&bytes).map_err(|e| {
                    TrustLensError::Storage(format!(
                        "Corrupt aggregate for {}: {}",
                        domain, e
                    ))
                })?;
                Ok(Some(aggregate))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl AggregateStore for RocksStore {
    async fn get_aggregate(&self, domain: &str) -> Result<Option<DomainAggregate>, TrustLensError> {
        self.get_aggregate_sync(domain)
    }

    async fn compare_and_swap(
        &self,
        domain: &str,
        expected: Option<&DomainAggregate>,
        new: &DomainAggregate,
    ) -> Result<bool, TrustLensError> {
        // Encode before taking the lock so a serialization failure writes nothing.
        let json = serde_json::to_vec(new)
            .map_err(|e| TrustLensError::Storage(format!("Failed to encode aggregate: {}", e)))?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| TrustLensError::Storage("RocksDB write lock poisoned".to_string()))?;

        let current = self.get_aggregate_sync(domain)?;
        if current.as_ref() != expected {
            return Ok(false);
        }
        self.put_raw(&Self::aggregate_key(domain), &json)?;
        Ok(true)
    }

    async fn list_domains(&self) -> Result<Vec<String>, TrustLensError> {
        let prefix = AGGREGATE_PREFIX.as_bytes();
        let mut domains = Vec::new();

        for item in self.db.prefix_iterator(prefix) {
            let (key, _value) = item
                .map_err(|e| TrustLensError::Storage(format!("RocksDB iteration error: {}", e)))?;

            // Stop when the prefix no longer matches.
            if !key.starts_with(prefix) {
                break;
            }

            if let Ok(domain) = std::str::from_utf8(&key[prefix.len()..]) {
                domains.push(domain.to_string());
            }
        }

        domains.sort();
        Ok(domains)
    }
}
