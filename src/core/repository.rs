use super::model::{Collection, InventoryItem, StorageBox};
use super::store::{InventoryStore, StoreError};

/// Box and item mutations over an [`InventoryStore`].
///
/// Every mutation loads the whole collection, edits it, writes it back and returns
/// the new collection. Lookup misses are no-ops, not errors.
#[derive(Clone)]
pub struct Repository {
    store: InventoryStore,
}

impl Repository {
    pub fn new(store: InventoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }

    fn mutate<F>(&self, apply: F) -> Result<Collection, StoreError>
    where
        F: FnOnce(&mut Collection) -> Result<(), StoreError>,
    {
        let mut boxes = self.store.load()?;
        apply(&mut boxes)?;
        self.store.save(&boxes)?;
        Ok(boxes)
    }

    pub fn list_boxes(&self) -> Result<Collection, StoreError> {
        self.store.load()
    }

    pub fn get_box(&self, box_id: &str) -> Result<Option<StorageBox>, StoreError> {
        Ok(self.store.load()?.into_iter().find(|b| b.id == box_id))
    }

    pub fn get_item(
        &self,
        box_id: &str,
        item_id: &str,
    ) -> Result<Option<InventoryItem>, StoreError> {
        Ok(self
            .get_box(box_id)?
            .and_then(|b| b.find_item(item_id).cloned()))
    }

    /// Appends a box. A box whose id is already taken is rejected and nothing is written.
    pub fn add_box(&self, storage_box: StorageBox) -> Result<Collection, StoreError> {
        storage_box.validate().map_err(StoreError::Invalid)?;
        self.mutate(|boxes| {
            if boxes.iter().any(|b| b.id == storage_box.id) {
                return Err(StoreError::DuplicateBox(storage_box.id));
            }
            boxes.push(storage_box);
            Ok(())
        })
    }

    pub fn update_box(&self, storage_box: StorageBox) -> Result<Collection, StoreError> {
        storage_box.validate().map_err(StoreError::Invalid)?;
        self.mutate(|boxes| {
            match boxes.iter_mut().find(|b| b.id == storage_box.id) {
                Some(slot) => *slot = storage_box,
                None => log::debug!("update_box: no box with id '{}'", storage_box.id),
            }
            Ok(())
        })
    }

    pub fn delete_box(&self, box_id: &str) -> Result<Collection, StoreError> {
        self.mutate(|boxes| {
            boxes.retain(|b| b.id != box_id);
            Ok(())
        })
    }

    /// Appends an item to `box_id`. An item id already used in that box is rejected.
    pub fn add_item_to_box(
        &self,
        box_id: &str,
        item: InventoryItem,
    ) -> Result<Collection, StoreError> {
        item.validate().map_err(StoreError::Invalid)?;
        self.mutate(|boxes| {
            let Some(target) = boxes.iter_mut().find(|b| b.id == box_id) else {
                return Ok(());
            };
            if target.find_item(&item.id).is_some() {
                return Err(StoreError::DuplicateItem {
                    box_id: box_id.to_string(),
                    item_id: item.id,
                });
            }
            target.items.push(item);
            Ok(())
        })
    }

    pub fn update_item_in_box(
        &self,
        box_id: &str,
        item: InventoryItem,
    ) -> Result<Collection, StoreError> {
        item.validate().map_err(StoreError::Invalid)?;
        self.mutate(|boxes| {
            let slot = boxes
                .iter_mut()
                .find(|b| b.id == box_id)
                .and_then(|b| b.items.iter_mut().find(|i| i.id == item.id));
            if let Some(slot) = slot {
                *slot = item;
            }
            Ok(())
        })
    }

    pub fn delete_item_from_box(
        &self,
        box_id: &str,
        item_id: &str,
    ) -> Result<Collection, StoreError> {
        self.mutate(|boxes| {
            if let Some(target) = boxes.iter_mut().find(|b| b.id == box_id) {
                target.items.retain(|i| i.id != item_id);
            }
            Ok(())
        })
    }
}
