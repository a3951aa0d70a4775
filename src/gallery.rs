use log::{info, warn};

use crate::api::{Artwork, RemoteStore};
use crate::error::{AppError, AppResult};

/// The user's saved artworks, as last fetched from the store.
///
/// Local edits only ever follow a confirmed remote change.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<Artwork>,
}

impl Gallery {
    pub fn new(items: Vec<Artwork>) -> Self {
        Self { items }
    }

    /// Fetches the complete list. No paging, no caching.
    pub async fn fetch<S: RemoteStore>(store: &S) -> AppResult<Vec<Artwork>> {
        let items = store.list_artworks().await?;
        info!("fetched {} artworks", items.len());
        Ok(items)
    }

    pub fn replace(&mut self, items: Vec<Artwork>) {
        self.items = items;
    }

    pub fn items(&self) -> &[Artwork] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Artwork> {
        self.items.iter().find(|artwork| artwork.id == id)
    }

    /// Drops an item the store has already deleted.
    pub fn remove_confirmed(&mut self, id: &str) -> Option<Artwork> {
        let index = self.items.iter().position(|artwork| artwork.id == id)?;
        Some(self.items.remove(index))
    }

    /// Deletes remotely, then locally. A rejected delete leaves the list untouched.
    pub async fn delete<S: RemoteStore>(&mut self, store: &S, id: &str) -> AppResult<()> {
        delete_remote(store, id).await?;
        self.remove_confirmed(id);
        Ok(())
    }
}

pub async fn delete_remote<S: RemoteStore>(store: &S, id: &str) -> AppResult<()> {
    store.delete_artwork(id).await.map_err(|err| {
        warn!("deleting artwork {id} failed: {err}");
        AppError::from(err)
    })?;
    info!("🗑 deleted artwork {id}");
    Ok(())
}
