use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::adapters::llm::DEFAULT_GEMINI_MODEL;
use crate::core::store::STORAGE_KEY;

/// Bump this when adding new fields with non-trivial defaults.
/// When a loaded config has a lower version, it is re-saved to disk
/// so that users see the new keys in their `config.toml`.
const CURRENT_CONFIG_VERSION: u32 = 1;

/// Environment variables consulted for the Gemini key, in order, before the config file.
const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const DEFAULT_USER_LANGUAGE: &str = "简体中文";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub config_version: u32,
    pub data_path: Option<String>,
    pub storage_key: Option<String>,
    pub gemini_model: Option<String>,
    pub google_api_key: Option<String>,
    pub user_language: Option<String>,
}

impl Settings {
    fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".boxkeep")
    }

    fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    pub fn load_global() -> Self {
        Self::load_from(&Self::global_config_path())
    }

    /// Reads settings from `path`, falling back to defaults when the file is absent
    /// or unparseable. Older versions are re-saved with the current version.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self {
                config_version: CURRENT_CONFIG_VERSION,
                ..Self::default()
            };
        }

        let content = std::fs::read_to_string(path).unwrap_or_default();
        let mut settings: Self = match toml::from_str(&content) {
            Ok(s) => s,
            Err(e) => {
                log::warn!(
                    "[config] Failed to parse {}: {e}. Using defaults.",
                    path.display()
                );
                Self::default()
            }
        };

        if settings.config_version < CURRENT_CONFIG_VERSION {
            settings.config_version = CURRENT_CONFIG_VERSION;
            if let Err(e) = settings.save_to(path) {
                log::warn!("[config] Failed to migrate config to v{CURRENT_CONFIG_VERSION}: {e}");
            }
        }

        settings
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::global_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, &content)?;
        Ok(())
    }

    /// SQLite file holding the inventory. Defaults to `~/.boxkeep/inventory.db`.
    pub fn data_path(&self) -> PathBuf {
        self.data_path
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::global_config_dir().join("inventory.db"))
    }

    pub fn storage_key(&self) -> String {
        non_empty(self.storage_key.as_deref()).unwrap_or_else(|| STORAGE_KEY.to_string())
    }

    pub fn gemini_model(&self) -> String {
        non_empty(self.gemini_model.as_deref())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
    }

    pub fn user_language(&self) -> String {
        non_empty(self.user_language.as_deref())
            .unwrap_or_else(|| DEFAULT_USER_LANGUAGE.to_string())
    }

    pub fn set_user_language(&mut self, language: &str) {
        self.user_language = non_empty(Some(language));
    }

    pub fn set_api_key(&mut self, key: &str) {
        self.google_api_key = non_empty(Some(key));
    }

    pub fn google_api_key(&self) -> Option<String> {
        self.resolve_api_key(|name| std::env::var(name).ok())
    }

    fn resolve_api_key(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        API_KEY_ENV_VARS
            .iter()
            .find_map(|name| non_empty(env(name).as_deref()))
            .or_else(|| non_empty(self.google_api_key.as_deref()))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
