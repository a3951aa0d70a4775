use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use coloring_book::api::{ApiError, ApiResult, Artwork, NewArtwork, Page, RemoteStore, StickerTemplate};
use coloring_book::catalog::Catalog;
use coloring_book::gallery::Gallery;
use coloring_book::palette::Brush;
use coloring_book::save;
use coloring_book::snapshot;
use coloring_book::state::EditorSettings;
use coloring_book::{AppError, Command, EditorState};
use egui::Pos2;
use futures::executor::block_on;
use parking_lot::Mutex;

const PAGE_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="80" height="100" viewBox="0 0 80 100">
  <circle cx="40" cy="50" r="30" fill="none" stroke="black" stroke-width="2"/>
</svg>"#;

/// In-memory store that records every call.
#[derive(Default)]
struct FakeStore {
    pages: Vec<Page>,
    artworks: Mutex<Vec<Artwork>>,
    created: Mutex<Vec<NewArtwork>>,
    page_queries: Mutex<Vec<Option<String>>>,
    reject_with: Mutex<Option<u16>>,
}

impl FakeStore {
    fn with_artworks(ids: &[&str]) -> Self {
        let store = Self::default();
        *store.artworks.lock() = ids.iter().map(|id| artwork(id)).collect();
        store
    }

    fn reject(&self, status: u16) {
        *self.reject_with.lock() = Some(status);
    }

    fn check(&self) -> ApiResult<()> {
        match *self.reject_with.lock() {
            Some(status) => Err(ApiError::Status(status)),
            None => Ok(()),
        }
    }
}

impl RemoteStore for FakeStore {
    async fn list_pages(&self, category: Option<&str>) -> ApiResult<Vec<Page>> {
        self.check()?;
        self.page_queries.lock().push(category.map(str::to_owned));
        Ok(self
            .pages
            .iter()
            .filter(|page| category.is_none() || page.category.as_deref() == category)
            .cloned()
            .collect())
    }

    async fn get_page(&self, id: &str) -> ApiResult<Page> {
        self.check()?;
        self.pages
            .iter()
            .find(|page| page.id == id)
            .cloned()
            .ok_or(ApiError::Status(404))
    }

    async fn list_stickers(&self) -> ApiResult<Vec<StickerTemplate>> {
        self.check()?;
        Ok(vec![StickerTemplate {
            id: "star".to_owned(),
            name: "Star".to_owned(),
            svg: String::new(),
        }])
    }

    async fn create_artwork(&self, new: &NewArtwork) -> ApiResult<Artwork> {
        self.check()?;
        self.created.lock().push(new.clone());
        let saved = Artwork {
            id: format!("art-{}", self.created.lock().len()),
            page_id: new.page_id.clone(),
            image_data: new.image_data.clone(),
            title: Some(new.title.clone()),
            completed_at: Utc::now(),
        };
        self.artworks.lock().push(saved.clone());
        Ok(saved)
    }

    async fn list_artworks(&self) -> ApiResult<Vec<Artwork>> {
        self.check()?;
        Ok(self.artworks.lock().clone())
    }

    async fn delete_artwork(&self, id: &str) -> ApiResult<()> {
        self.check()?;
        self.artworks.lock().retain(|artwork| artwork.id != id);
        Ok(())
    }
}

fn artwork(id: &str) -> Artwork {
    Artwork {
        id: id.to_owned(),
        page_id: "owl".to_owned(),
        image_data: String::new(),
        title: None,
        completed_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
    }
}

fn page(id: &str, category: &str) -> Page {
    Page {
        id: id.to_owned(),
        name: "Owl".to_owned(),
        category: Some(category.to_owned()),
        svg: PAGE_SVG.to_owned(),
        thumbnail_url: None,
    }
}

fn small_editor() -> EditorState {
    let settings = EditorSettings {
        canvas: coloring_book::geometry::CanvasSize {
            width: 80,
            height: 100,
        },
        ..EditorSettings::default()
    };
    EditorState::new(Arc::new(page("owl", "Animals")), Brush::default(), settings)
        .handle(Command::PointerDown(Pos2::new(10.0, 10.0)))
        .handle(Command::PointerMove(Pos2::new(60.0, 80.0)))
        .handle(Command::PointerUp)
}

fn saved_at() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 9, 12, 5, 0).unwrap()
}

#[test]
fn saving_submits_exactly_once_with_a_default_title() {
    let store = FakeStore::default();
    let editor = small_editor();

    let saved = block_on(save::save_artwork(&store, &editor, saved_at())).unwrap();

    let created = store.created.lock();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].page_id, "owl");
    assert_eq!(created[0].title, "Owl - 2024-03-09 12:05");
    assert_eq!(saved.display_title(), "Owl - 2024-03-09 12:05");

    let png = snapshot::decode_image_data(&created[0].image_data).unwrap();
    let image = image::load_from_memory(&png).unwrap();
    assert_eq!((image.width(), image.height()), (80, 100));
}

#[test]
fn a_typed_title_is_trimmed_and_kept() {
    let store = FakeStore::default();
    let editor = small_editor().handle(Command::SetTitle("  Night owl ".to_owned()));

    block_on(save::save_artwork(&store, &editor, saved_at())).unwrap();

    assert_eq!(store.created.lock()[0].title, "Night owl");
}

#[test]
fn a_rejected_save_reports_the_status_and_keeps_the_editor() {
    let store = FakeStore::default();
    store.reject(503);
    let editor = small_editor();

    let err = block_on(save::save_artwork(&store, &editor, saved_at())).unwrap_err();

    assert!(matches!(err, AppError::Rejected(503)));
    assert!(store.created.lock().is_empty());
    assert_eq!(editor.document().strokes().len(), 1);
}

#[test]
fn gallery_lists_saved_artwork() {
    let store = FakeStore::default();
    block_on(save::save_artwork(&store, &small_editor(), saved_at())).unwrap();

    let gallery = Gallery::new(block_on(Gallery::fetch(&store)).unwrap());

    assert_eq!(gallery.items().len(), 1);
    assert_eq!(gallery.items()[0].page_id, "owl");
}

#[test]
fn confirmed_delete_removes_the_item() {
    let store = FakeStore::with_artworks(&["a", "b", "c"]);
    let mut gallery = Gallery::new(block_on(Gallery::fetch(&store)).unwrap());

    block_on(gallery.delete(&store, "b")).unwrap();

    let ids: Vec<_> = gallery.items().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
    assert_eq!(store.artworks.lock().len(), 2);
}

#[test]
fn rejected_delete_leaves_the_gallery_unchanged() {
    let store = FakeStore::with_artworks(&["a", "b"]);
    let mut gallery = Gallery::new(block_on(Gallery::fetch(&store)).unwrap());
    store.reject(500);

    let err = block_on(gallery.delete(&store, "a")).unwrap_err();

    assert!(matches!(err, AppError::Rejected(500)));
    assert_eq!(gallery.items().len(), 2);
    assert!(gallery.get("a").is_some());
}

#[test]
fn catalog_fetch_forwards_the_category_filter() {
    let store = FakeStore {
        pages: vec![page("owl", "Animals"), page("rocket", "Space")],
        ..FakeStore::default()
    };

    let mut catalog = Catalog::default();
    catalog.replace(block_on(Catalog::fetch(&store, None)).unwrap());
    assert_eq!(catalog.pages().len(), 2);
    assert_eq!(catalog.stickers().len(), 1);

    catalog.replace(block_on(Catalog::fetch(&store, Some("Space".to_owned()))).unwrap());
    assert_eq!(catalog.pages().len(), 1);
    assert_eq!(catalog.category(), Some("Space"));
    assert_eq!(catalog.categories(), ["Animals", "Space"]);

    assert_eq!(*store.page_queries.lock(), [None, Some("Space".to_owned())]);
}

#[test]
fn opening_an_unknown_page_is_an_error() {
    let store = FakeStore::default();
    let err = block_on(Catalog::open_page(&store, "missing")).unwrap_err();
    assert!(matches!(err, AppError::Rejected(404)));
}
