use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Item, ItemId};

/// Returns `list` with `item` appended, unless an item with the same id is already there
pub fn add(list: &[Item], item: &Item) -> Vec<Item> {
    let mut updated = list.to_vec();
    if !list.iter().any(|fav| fav.id == item.id) {
        updated.push(item.clone());
    }
    updated
}

/// Returns `list` without the item sharing `item`'s id
pub fn remove(list: &[Item], item: &Item) -> Vec<Item> {
    list.iter()
        .filter(|fav| fav.id != item.id)
        .cloned()
        .collect()
}

/// Shared favourites list
///
/// Each mutation runs `add`/`remove` on the current list and stores the result under
/// the write lock, so concurrent callers never lose each other's updates.
#[derive(Clone, Default)]
pub struct FavouritesStore {
    inner: Arc<RwLock<Vec<Item>>>,
}

impl FavouritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item`; returns false if it was already a favourite
    pub async fn add(&self, item: &Item) -> bool {
        let mut list = self.inner.write().await;
        let updated = add(&list, item);
        let inserted = updated.len() != list.len();
        *list = updated;

        if inserted {
            tracing::debug!(item_id = %item.id, total = list.len(), "Favourite added");
        }

        inserted
    }

    /// Removes `item`; returns false if it was not a favourite
    pub async fn remove(&self, item: &Item) -> bool {
        let mut list = self.inner.write().await;
        let updated = remove(&list, item);
        let removed = updated.len() != list.len();
        *list = updated;

        if removed {
            tracing::debug!(item_id = %item.id, total = list.len(), "Favourite removed");
        }

        removed
    }

    pub async fn contains(&self, id: &ItemId) -> bool {
        self.inner.read().await.iter().any(|fav| &fav.id == id)
    }

    /// Copy of the list in insertion order
    pub async fn snapshot(&self) -> Vec<Item> {
        self.inner.read().await.clone()
    }
}
