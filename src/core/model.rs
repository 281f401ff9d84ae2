use serde::{Deserialize, Serialize};

/// Swatch tokens a box may carry. The first entry is the default for new boxes.
pub const BOX_COLORS: [&str; 18] = [
    "bg-slate-100",
    "bg-red-100",
    "bg-orange-100",
    "bg-amber-100",
    "bg-yellow-100",
    "bg-lime-100",
    "bg-green-100",
    "bg-emerald-100",
    "bg-teal-100",
    "bg-cyan-100",
    "bg-sky-100",
    "bg-blue-100",
    "bg-indigo-100",
    "bg-violet-100",
    "bg-purple-100",
    "bg-fuchsia-100",
    "bg-pink-100",
    "bg-rose-100",
];

pub fn default_box_color() -> &'static str {
    BOX_COLORS[0]
}

pub fn is_palette_color(color: &str) -> bool {
    BOX_COLORS.contains(&color)
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttribute {
    pub key: String,
    pub value: String,
}

impl ItemAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub attributes: Vec<ItemAttribute>,
    pub added_at: String,
}

impl InventoryItem {
    /// Fresh item with a generated id, quantity 1 and `added_at` stamped now.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_item_id(),
            name: name.into(),
            description: None,
            category: None,
            quantity: default_quantity(),
            attributes: Vec::new(),
            added_at: now_iso(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("item id is required".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("item name is required".to_string());
        }
        Ok(())
    }
}

/// A physical container. `id` is also the payload of its printed code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageBox {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

impl StorageBox {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: location.into(),
            color: Some(default_box_color().to_string()),
            items: Vec::new(),
        }
    }

    /// Checks the box's own required fields. Stored colors and items are not
    /// re-checked, so records written by older versions stay editable.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("box id is required".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("box name is required".to_string());
        }
        if self.location.trim().is_empty() {
            return Err("box location is required".to_string());
        }
        Ok(())
    }

    pub fn find_item(&self, item_id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

/// The whole persisted state, in insertion order.
pub type Collection = Vec<StorageBox>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub box_count: usize,
    pub item_count: usize,
    pub total_quantity: u64,
}

pub fn summarize(boxes: &[StorageBox]) -> InventorySummary {
    let items = boxes.iter().flat_map(|b| b.items.iter());
    InventorySummary {
        box_count: boxes.len(),
        item_count: boxes.iter().map(|b| b.items.len()).sum(),
        total_quantity: items.map(|item| u64::from(item.quantity)).sum(),
    }
}

/// Suggested values overwrite existing ones with the same key; unknown keys are appended.
pub fn merge_attributes(existing: &mut Vec<ItemAttribute>, suggested: Vec<ItemAttribute>) {
    for attribute in suggested {
        match existing.iter_mut().find(|a| a.key == attribute.key) {
            Some(slot) => *slot = attribute,
            None => existing.push(attribute),
        }
    }
}

pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn generate_item_id() -> String {
    format!("item-{}", chrono::Utc::now().timestamp_millis())
}

/// `item-<unix millis>`, suffixed with `-N` when another item in `items` already has it.
pub fn next_item_id(items: &[InventoryItem]) -> String {
    item_id_from(chrono::Utc::now().timestamp_millis(), items)
}

fn item_id_from(millis: i64, items: &[InventoryItem]) -> String {
    let base = format!("item-{millis}");
    let taken = |id: &str| items.iter().any(|item| item.id == id);
    if !taken(&base) {
        return base;
    }
    (1u32..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}

/// Short printable id `box-NNNN` seeded from the last four digits of the current
/// unix millis, stepping forward past ids already in `boxes`.
pub fn next_box_id(boxes: &[StorageBox]) -> String {
    let start = chrono::Utc::now().timestamp_millis().rem_euclid(10_000);
    box_id_from(start, boxes)
}

fn box_id_from(start: i64, boxes: &[StorageBox]) -> String {
    (0..10_000)
        .map(|offset| format!("box-{:04}", (start + offset) % 10_000))
        .find(|candidate| !boxes.iter().any(|b| &b.id == candidate))
        // every short id is taken; fall back to the full timestamp
        .unwrap_or_else(|| format!("box-{}", chrono::Utc::now().timestamp_millis()))
}
