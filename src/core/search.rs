use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::model::{InventoryItem, StorageBox};

/// One matching item together with the box that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub box_id: String,
    pub box_name: String,
    pub box_location: String,
    pub item: InventoryItem,
}

impl SearchHit {
    fn new(storage_box: &StorageBox, item: &InventoryItem) -> Self {
        Self {
            box_id: storage_box.id.clone(),
            box_name: storage_box.name.clone(),
            box_location: storage_box.location.clone(),
            item: item.clone(),
        }
    }
}

fn contains_lowercase(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn name_or_category_matches(item: &InventoryItem, needle_lower: &str) -> bool {
    contains_lowercase(&item.name, needle_lower)
        || item
            .category
            .as_deref()
            .is_some_and(|category| contains_lowercase(category, needle_lower))
}

fn local_match(item: &InventoryItem, needle_lower: &str) -> bool {
    name_or_category_matches(item, needle_lower)
        || item
            .attributes
            .iter()
            .any(|attribute| contains_lowercase(&attribute.value, needle_lower))
}

/// Phase 1: case-insensitive substring match on name, category and attribute values.
///
/// Hits come back in box order, then item order within each box.
pub fn local_search(boxes: &[StorageBox], query: &str) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    boxes
        .iter()
        .flat_map(|storage_box| {
            storage_box
                .items
                .iter()
                .filter(|item| local_match(item, &needle))
                .map(move |item| SearchHit::new(storage_box, item))
        })
        .collect()
}

/// Phase 2: items whose name or category contains one of `terms`, excluding
/// everything already in `phase_one`.
///
/// Only the new hits are returned, ordered by term and then by traversal order.
/// Blank terms are skipped since they would match every item.
pub fn expand_search(
    boxes: &[StorageBox],
    phase_one: &[SearchHit],
    terms: &[String],
) -> Vec<SearchHit> {
    let mut seen: HashSet<&str> = phase_one.iter().map(|hit| hit.item.id.as_str()).collect();
    let mut expanded = Vec::new();

    for term in terms {
        if term.trim().is_empty() {
            continue;
        }
        let needle = term.to_lowercase();
        for storage_box in boxes {
            for item in &storage_box.items {
                if seen.contains(item.id.as_str()) {
                    continue;
                }
                if name_or_category_matches(item, &needle) {
                    seen.insert(item.id.as_str());
                    expanded.push(SearchHit::new(storage_box, item));
                }
            }
        }
    }

    expanded
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Orders overlapping searches so a slow expansion cannot overwrite a newer query.
///
/// Every query, including an empty one, takes a new ticket; an expansion result is
/// applied only if its ticket is still the latest.
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: AtomicU64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::{expand_search, local_search, SearchHit, SearchSession};
    use crate::core::model::{InventoryItem, ItemAttribute, StorageBox};
    use crate::core::seed::seed_collection;

    fn item_ids(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|hit| hit.item.id.as_str()).collect()
    }

    fn mouse_box() -> Vec<StorageBox> {
        let mut item = InventoryItem::new("罗技 MX Master 3");
        item.id = "item-1".to_string();
        item.category = Some("电子产品".to_string());
        item.attributes = vec![ItemAttribute::new("类型", "鼠标")];
        let mut storage_box = StorageBox::new("box-001", "杂项电子", "A-2 货架");
        storage_box.items.push(item);
        vec![storage_box]
    }

    #[test]
    fn attribute_value_matches_in_phase_one() {
        let boxes = mouse_box();
        let hits = local_search(&boxes, "鼠标");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].box_id, "box-001");
        assert_eq!(hits[0].item.id, "item-1");
    }

    #[test]
    fn unmatched_query_stays_empty_after_expansion() {
        let boxes = mouse_box();
        let phase_one = local_search(&boxes, "不存在的东西");
        assert!(phase_one.is_empty());

        let expanded = expand_search(&boxes, &phase_one, &["周边设备".to_string()]);
        assert!(expanded.is_empty());
    }

    #[test]
    fn case_does_not_affect_matches() {
        let boxes = seed_collection();
        let upper = local_search(&boxes, "HDMI");
        let lower = local_search(&boxes, "hdmi");
        let mixed = local_search(&boxes, "HdMi");

        assert_eq!(item_ids(&upper), vec!["item-2"]);
        assert_eq!(upper, lower);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn empty_query_yields_nothing() {
        assert!(local_search(&seed_collection(), "").is_empty());
    }

    #[test]
    fn description_is_not_searched_locally() {
        let boxes = seed_collection();
        assert!(local_search(&boxes, "磨损").is_empty());
    }

    #[test]
    fn hits_follow_box_then_item_order() {
        let boxes = seed_collection();
        let hits = local_search(&boxes, "A");
        assert_eq!(item_ids(&hits), vec!["item-1", "item-3"]);
    }

    #[test]
    fn expansion_never_repeats_phase_one_or_earlier_terms() {
        let boxes = seed_collection();
        let phase_one = local_search(&boxes, "鼠标");
        assert_eq!(item_ids(&phase_one), vec!["item-1"]);

        let terms = vec![
            "线缆".to_string(),
            "电子".to_string(),
            "HDMI".to_string(),
            "户外".to_string(),
        ];
        let expanded = expand_search(&boxes, &phase_one, &terms);

        assert_eq!(item_ids(&expanded), vec!["item-2", "item-3"]);
        assert!(expanded
            .iter()
            .all(|hit| !phase_one.iter().any(|p| p.item.id == hit.item.id)));
    }

    #[test]
    fn expansion_only_checks_name_and_category() {
        let boxes = seed_collection();
        let expanded = expand_search(&boxes, &[], &["IP67".to_string()]);
        assert!(expanded.is_empty());
    }

    #[test]
    fn blank_terms_are_ignored() {
        let boxes = seed_collection();
        let expanded = expand_search(&boxes, &[], &[" ".to_string(), String::new()]);
        assert!(expanded.is_empty());
    }

    #[test]
    fn newer_ticket_supersedes_older_one() {
        let session = SearchSession::new();
        let first = session.begin();
        assert!(session.is_current(first));

        let second = session.begin();
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }
}
