use std::sync::Arc;

use thiserror::Error;

use super::model::{Collection, StorageBox};
use super::ports::kv::KvStorePort;
use super::ports::DynError;
use super::seed::seed_collection;

pub const STORAGE_KEY: &str = "smartbox_inventory_v1";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(DynError),
    #[error("failed to serialize inventory: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("box id '{0}' already exists")]
    DuplicateBox(String),
    #[error("item id '{item_id}' already exists in box '{box_id}'")]
    DuplicateItem { box_id: String, item_id: String },
    #[error("invalid record: {0}")]
    Invalid(String),
}

/// The whole collection of boxes, persisted as one JSON document under one key.
#[derive(Clone)]
pub struct InventoryStore {
    kv: Arc<dyn KvStorePort>,
    key: String,
}

impl InventoryStore {
    pub fn new(kv: Arc<dyn KvStorePort>) -> Self {
        Self::with_key(kv, STORAGE_KEY)
    }

    pub fn with_key(kv: Arc<dyn KvStorePort>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the collection, seeding the store when the key is empty.
    ///
    /// A stored value that fails to parse is logged and replaced in the result by
    /// the seed; the stored bytes are left as they are until the next save.
    pub fn load(&self) -> Result<Collection, StoreError> {
        let stored = self.kv.get(&self.key).map_err(StoreError::Backend)?;
        let Some(raw) = stored else {
            let seed = seed_collection();
            self.save(&seed)?;
            log::debug!("seeded inventory under '{}'", self.key);
            return Ok(seed);
        };

        match serde_json::from_str::<Collection>(&raw) {
            Ok(boxes) => Ok(boxes),
            Err(error) => {
                log::error!(
                    "Failed to parse inventory under '{}': {}. Using seed data.",
                    self.key,
                    error
                );
                Ok(seed_collection())
            }
        }
    }

    pub fn save(&self, boxes: &[StorageBox]) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(boxes)?;
        self.kv
            .set(&self.key, &serialized)
            .map_err(StoreError::Backend)
    }
}
