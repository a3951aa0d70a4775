use std::sync::Arc;

use log::info;

use crate::api::{Page, RemoteStore, StickerTemplate};
use crate::error::AppResult;
use crate::sticker::StickerRef;

/// Coloring pages and stickers available to start a new artwork from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pages: Vec<Page>,
    stickers: Vec<StickerRef>,
    category: Option<String>,
    known_categories: Vec<String>,
}

/// One catalog fetch: pages (possibly filtered) plus every sticker.
#[derive(Debug, Clone)]
pub struct CatalogContents {
    pub pages: Vec<Page>,
    pub stickers: Vec<StickerTemplate>,
    pub category: Option<String>,
}

impl Catalog {
    /// Fetches pages and stickers concurrently.
    pub async fn fetch<S: RemoteStore>(
        store: &S,
        category: Option<String>,
    ) -> AppResult<CatalogContents> {
        let (pages, stickers) = futures::try_join!(
            store.list_pages(category.as_deref()),
            store.list_stickers()
        )?;
        info!(
            "catalog: {} pages ({}), {} stickers",
            pages.len(),
            category.as_deref().unwrap_or("all categories"),
            stickers.len()
        );
        Ok(CatalogContents {
            pages,
            stickers,
            category,
        })
    }

    /// Loads one page with its full outline before opening the editor.
    pub async fn open_page<S: RemoteStore>(store: &S, id: &str) -> AppResult<Arc<Page>> {
        let page = store.get_page(id).await?;
        info!("opened page {} ({})", page.id, page.name);
        Ok(Arc::new(page))
    }

    pub fn replace(&mut self, contents: CatalogContents) {
        self.pages = contents.pages;
        self.stickers = contents.stickers.into_iter().map(Arc::new).collect();
        self.category = contents.category;
        for category in self.pages.iter().filter_map(|page| page.category.as_ref()) {
            if !self.known_categories.contains(category) {
                self.known_categories.push(category.clone());
            }
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn stickers(&self) -> &[StickerRef] {
        &self.stickers
    }

    /// The category the current page list was filtered by.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Distinct categories seen across all fetches, in first-seen order.
    ///
    /// Kept across filtered fetches so the filter can be switched back.
    pub fn categories(&self) -> &[String] {
        &self.known_categories
    }
}
