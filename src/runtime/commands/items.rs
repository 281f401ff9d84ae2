use crate::core::model::{merge_attributes, next_item_id, InventoryItem, ItemAttribute, StorageBox};
use crate::runtime::AppState;

use super::boxes::get_box;
use super::shared::{clean_attributes, optional_text, required_text, store_error, ItemDraft};

pub fn get_item(state: &AppState, box_id: &str, item_id: &str) -> Result<InventoryItem, String> {
    get_box(state, box_id)?
        .find_item(item_id)
        .cloned()
        .ok_or_else(|| format!("Item not found: {}", item_id))
}

/// Adds a new item with a fresh id and `added_at`. Quantity defaults to 1.
/// The id is unique within the target box even when two items land in the same millisecond.
pub fn create_item(
    state: &AppState,
    box_id: &str,
    draft: ItemDraft,
) -> Result<Vec<StorageBox>, String> {
    let target = get_box(state, box_id)?;
    let mut item = InventoryItem::new(required_text(&draft.name, "name")?);
    item.id = next_item_id(&target.items);
    item.description = optional_text(draft.description);
    item.category = optional_text(draft.category);
    item.quantity = draft.quantity.unwrap_or(1);
    item.attributes = clean_attributes(draft.attributes);

    log::debug!("adding item '{}' to box '{}'", item.id, target.id);
    state
        .repository
        .add_item_to_box(&target.id, item)
        .map_err(store_error)
}

/// Replaces the editable fields of an item; `id` and `added_at` are kept.
pub fn update_item(
    state: &AppState,
    box_id: &str,
    item_id: &str,
    draft: ItemDraft,
) -> Result<Vec<StorageBox>, String> {
    let existing = get_item(state, box_id, item_id)?;
    let item = InventoryItem {
        name: required_text(&draft.name, "name")?,
        description: optional_text(draft.description),
        category: optional_text(draft.category),
        quantity: draft.quantity.unwrap_or(existing.quantity),
        attributes: clean_attributes(draft.attributes),
        ..existing
    };
    state
        .repository
        .update_item_in_box(box_id.trim(), item)
        .map_err(store_error)
}

pub fn delete_item(
    state: &AppState,
    box_id: &str,
    item_id: &str,
) -> Result<Vec<StorageBox>, String> {
    state
        .repository
        .delete_item_from_box(box_id.trim(), item_id.trim())
        .map_err(store_error)
}

/// Merges AI-suggested attributes into the form's current attributes.
/// Without a name there is nothing to describe, so `current` comes back unchanged.
pub async fn suggest_item_attributes(
    state: &AppState,
    name: &str,
    description: &str,
    current: Vec<ItemAttribute>,
) -> Vec<ItemAttribute> {
    let mut attributes = current;
    if name.trim().is_empty() {
        return attributes;
    }
    let suggested = state
        .suggestions
        .suggest_attributes(name.trim(), description.trim())
        .await;
    merge_attributes(&mut attributes, suggested);
    attributes
}
