use std::sync::Arc;

use crate::adapters::config::Settings;
use crate::adapters::kv::SqliteKvStore;
use crate::adapters::llm::adapter_from_settings;
use crate::adapters::suggest::SuggestionService;
use crate::core::ports::kv::KvStorePort;
use crate::core::ports::llm::GenerationPort;
use crate::core::repository::Repository;
use crate::core::search::SearchSession;
use crate::core::store::InventoryStore;

/// Everything the commands need, wired once per process.
pub struct AppState {
    pub settings: Settings,
    pub repository: Repository,
    pub suggestions: SuggestionService,
    pub search: SearchSession,
}

impl AppState {
    pub fn open_global() -> Result<Self, String> {
        Self::open(Settings::load_global())
    }

    /// SQLite-backed inventory at `settings.data_path()`, Gemini suggestions when a key is set.
    pub fn open(settings: Settings) -> Result<Self, String> {
        let db_path = settings.data_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                format!("Failed to create data directory {}: {e}", parent.display())
            })?;
        }
        log::debug!("opening inventory at {}", db_path.display());

        let kv: Arc<dyn KvStorePort> = Arc::new(SqliteKvStore::new(db_path));
        let llm = adapter_from_settings(&settings);
        Ok(Self::with_backends(settings, kv, llm))
    }

    pub fn with_backends(
        settings: Settings,
        kv: Arc<dyn KvStorePort>,
        llm: Option<Arc<dyn GenerationPort>>,
    ) -> Self {
        let store = InventoryStore::with_key(kv, settings.storage_key());
        let suggestions = SuggestionService::new(llm, settings.user_language());
        Self {
            settings,
            repository: Repository::new(store),
            suggestions,
            search: SearchSession::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::adapters::config::Settings;

    #[test]
    fn open_creates_sqlite_inventory_under_data_path() {
        let dir = std::env::temp_dir().join(format!("boxkeep-state-{}", uuid::Uuid::new_v4()));
        let settings = Settings {
            data_path: Some(dir.join("data").join("inventory.db").display().to_string()),
            storage_key: Some("test_inventory".to_string()),
            ..Settings::default()
        };

        let state = AppState::open(settings).expect("open state");
        let boxes = state.repository.list_boxes().expect("list seeded boxes");

        assert_eq!(boxes.len(), 3);
        assert_eq!(state.repository.store().key(), "test_inventory");
        assert!(dir.join("data").join("inventory.db").exists());

        let _ = std::fs::remove_dir_all(dir);
    }
}
