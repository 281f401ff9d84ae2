use crate::core::model::{default_box_color, next_box_id, summarize, InventorySummary, StorageBox};
use crate::core::view::resolve_scan as resolve_scan_code;
use crate::runtime::AppState;

use super::shared::{
    optional_text, palette_color, required_text, store_error, BoxDraft, ScanResponse,
};

pub fn list_boxes(state: &AppState) -> Result<Vec<StorageBox>, String> {
    state.repository.list_boxes().map_err(store_error)
}

pub fn get_box(state: &AppState, box_id: &str) -> Result<StorageBox, String> {
    state
        .repository
        .get_box(box_id.trim())
        .map_err(store_error)?
        .ok_or_else(|| format!("Box not found: {}", box_id))
}

pub fn inventory_summary(state: &AppState) -> Result<InventorySummary, String> {
    Ok(summarize(&list_boxes(state)?))
}

/// Looks up a scanned code. Unknown codes yield a box form pre-filled with the code.
pub fn resolve_scan(state: &AppState, code: &str) -> Result<ScanResponse, String> {
    let boxes = list_boxes(state)?;
    let outcome = resolve_scan_code(&boxes, code);
    let next_view = outcome.next_view();
    Ok(ScanResponse { outcome, next_view })
}

/// Adds a box under the scanned code, or under a fresh `box-NNNN` id when none was given.
/// A scanned code that is already taken is rejected.
pub fn create_box(state: &AppState, draft: BoxDraft) -> Result<Vec<StorageBox>, String> {
    let name = required_text(&draft.name, "name")?;
    let location = required_text(&draft.location, "location")?;
    let color = palette_color(draft.color)?.unwrap_or_else(|| default_box_color().to_string());
    let id = match optional_text(draft.id) {
        Some(id) => id,
        None => next_box_id(&list_boxes(state)?),
    };
    let storage_box = StorageBox {
        id,
        name,
        location,
        color: Some(color),
        items: Vec::new(),
    };
    log::debug!("creating box '{}'", storage_box.id);
    state
        .repository
        .add_box(storage_box)
        .map_err(store_error)
}

/// Edits name, location and color. The id and the items are kept as stored, and so is
/// the color when the form leaves it unset.
pub fn update_box(
    state: &AppState,
    box_id: &str,
    draft: BoxDraft,
) -> Result<Vec<StorageBox>, String> {
    let existing = get_box(state, box_id)?;
    let color = palette_color(draft.color)?.or_else(|| existing.color.clone());
    let storage_box = StorageBox {
        name: required_text(&draft.name, "name")?,
        location: required_text(&draft.location, "location")?,
        color,
        ..existing
    };
    state
        .repository
        .update_box(storage_box)
        .map_err(store_error)
}

pub fn delete_box(state: &AppState, box_id: &str) -> Result<Vec<StorageBox>, String> {
    state
        .repository
        .delete_box(box_id.trim())
        .map_err(store_error)
}
