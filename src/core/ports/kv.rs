use super::DynError;

/// String-keyed persistence the inventory store writes through.
pub trait KvStorePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, DynError>;
    fn set(&self, key: &str, value: &str) -> Result<(), DynError>;
}
