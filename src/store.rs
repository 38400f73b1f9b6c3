//! Shipment record persistence.
//!
//! The store is a plain key-value blob contract: `put` writes a record
//! under a fresh id, `get` reads one back. Records are never updated in
//! place; re-saving a shipment mints a new id.

use crate::error::{AircostError, AircostResult};
use crate::types::ShipmentRecord;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// External persistence contract for shipment records.
pub trait ShipmentStore {
    /// Persist a record and return its new id.
    fn put(&self, record: &ShipmentRecord) -> AircostResult<String>;

    /// Fetch a record by id; `None` when absent.
    fn get(&self, id: &str) -> AircostResult<Option<ShipmentRecord>>;
}

/// Directory-of-JSON-blobs store: one `<uuid>.json` file per record.
pub struct JsonShipmentStore {
    dir: PathBuf,
}

impl JsonShipmentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn blob_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl ShipmentStore for JsonShipmentStore {
    fn put(&self, record: &ShipmentRecord) -> AircostResult<String> {
        fs::create_dir_all(&self.dir)?;
        let id = Uuid::new_v4().to_string();
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| AircostError::Store(format!("Failed to serialize record: {e}")))?;
        fs::write(self.blob_path(&id), json)?;
        info!(%id, "shipment record saved");
        Ok(id)
    }

    fn get(&self, id: &str) -> AircostResult<Option<ShipmentRecord>> {
        let path = self.blob_path(id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path)?;
        let record = serde_json::from_str(&json)
            .map_err(|e| AircostError::Store(format!("Corrupt record '{id}': {e}")))?;
        Ok(Some(record))
    }
}
