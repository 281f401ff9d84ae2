use serde::{Deserialize, Serialize};

use super::model::StorageBox;

/// Mutually exclusive screens of the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    Dashboard,
    Scanner,
    BoxDetail {
        #[serde(rename = "boxId")]
        box_id: String,
    },
    /// Create a box (optionally pre-filled from a scan) or edit an existing one.
    BoxForm {
        #[serde(rename = "boxId", default, skip_serializing_if = "Option::is_none")]
        box_id: Option<String>,
        #[serde(rename = "scannedId", default, skip_serializing_if = "Option::is_none")]
        scanned_id: Option<String>,
    },
    /// Add an item when `item_id` is absent, edit it otherwise.
    ItemForm {
        #[serde(rename = "boxId")]
        box_id: String,
        #[serde(rename = "itemId", default, skip_serializing_if = "Option::is_none")]
        item_id: Option<String>,
    },
    Search,
}

impl ViewState {
    pub fn box_id(&self) -> Option<&str> {
        match self {
            ViewState::BoxDetail { box_id } | ViewState::ItemForm { box_id, .. } => {
                Some(box_id.as_str())
            }
            ViewState::BoxForm { box_id, .. } => box_id.as_deref(),
            ViewState::Dashboard | ViewState::Scanner | ViewState::Search => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScanOutcome {
    Found {
        #[serde(rename = "box")]
        storage_box: StorageBox,
    },
    /// No box carries this code yet; the caller may offer to create one with it.
    Unknown { code: String },
}

impl ScanOutcome {
    pub fn next_view(&self) -> ViewState {
        match self {
            ScanOutcome::Found { storage_box } => ViewState::BoxDetail {
                box_id: storage_box.id.clone(),
            },
            ScanOutcome::Unknown { code } => ViewState::BoxForm {
                box_id: None,
                scanned_id: Some(code.clone()),
            },
        }
    }
}

/// Treats a scanned payload as a candidate box id.
pub fn resolve_scan(boxes: &[StorageBox], code: &str) -> ScanOutcome {
    let code = code.trim();
    match boxes.iter().find(|b| b.id == code) {
        Some(storage_box) => ScanOutcome::Found {
            storage_box: storage_box.clone(),
        },
        None => ScanOutcome::Unknown {
            code: code.to_string(),
        },
    }
}
