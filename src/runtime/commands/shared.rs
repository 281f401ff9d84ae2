use serde::{Deserialize, Serialize};

use crate::core::model::{is_palette_color, ItemAttribute};
use crate::core::search::SearchHit;
use crate::core::store::StoreError;
use crate::core::view::{ScanOutcome, ViewState};

/// Fields the box form submits. `id` is only honored on creation.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BoxDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub attributes: Vec<ItemAttribute>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub outcome: ScanOutcome,
    pub next_view: ViewState,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
    /// Terms used for the expansion pass; empty for a plain local search.
    pub terms: Vec<String>,
}

pub fn store_error(error: StoreError) -> String {
    error.to_string()
}

pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn required_text(value: &str, field: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }
    Ok(trimmed.to_string())
}

/// A submitted color must be a palette token; blank means "not chosen".
pub fn palette_color(value: Option<String>) -> Result<Option<String>, String> {
    match optional_text(value) {
        Some(color) if !is_palette_color(&color) => Err(format!("unknown box color '{color}'")),
        color => Ok(color),
    }
}

/// Drops rows the form left blank and trims the rest.
pub fn clean_attributes(attributes: Vec<ItemAttribute>) -> Vec<ItemAttribute> {
    attributes
        .into_iter()
        .map(|a| ItemAttribute::new(a.key.trim(), a.value.trim()))
        .filter(|a| !a.key.is_empty())
        .collect()
}
