use std::collections::HashSet;
use std::sync::Arc;

use chrono::Local;
use log::{info, warn};

use crate::api::{HttpStore, Page};
use crate::catalog::Catalog;
use crate::command::Command;
use crate::config::AppConfig;
use crate::gallery::Gallery;
use crate::input::InputHandler;
use crate::notice::{Notice, NoticeAction, NoticeKind};
use crate::palette::PaletteSelection;
use crate::panels;
use crate::renderer::Renderer;
use crate::requests::{Request, Requests, Response};
use crate::save;
use crate::state::EditorState;

/// The three screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Catalog,
    Canvas,
    Gallery,
}

/// Settings restored between runs.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default, Clone)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Preferences {
    pub palette: PaletteSelection,
}

/// Requests currently in flight, for spinners and disabled buttons.
#[derive(Debug, Default)]
pub(crate) struct Loading {
    pub catalog: bool,
    pub page: bool,
    pub gallery: bool,
    pub save: save::SaveGate,
    pub deleting: HashSet<String>,
}

pub struct ColoringApp {
    pub(crate) config: AppConfig,
    pub(crate) preferences: Preferences,
    pub(crate) requests: Requests,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    pub(crate) screen: Screen,
    pub(crate) catalog: Catalog,
    pub(crate) editor: Option<EditorState>,
    pub(crate) gallery: Gallery,
    pub(crate) loading: Loading,
    pub(crate) notice: Option<Notice>,
    pub(crate) show_clear_confirm: bool,
    pub(crate) pending_delete: Option<String>,
}

impl ColoringApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let preferences: Preferences = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        info!("using API at {}", config.api_base_url);
        let store = HttpStore::new(config.api_base_url.clone());

        let mut app = Self {
            requests: Requests::new(store, cc.egui_ctx.clone()),
            config,
            preferences,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            screen: Screen::Catalog,
            catalog: Catalog::default(),
            editor: None,
            gallery: Gallery::default(),
            loading: Loading::default(),
            notice: None,
            show_clear_confirm: false,
            pending_delete: None,
        };
        app.load_catalog(None);
        app
    }

    pub(crate) fn modal_open(&self) -> bool {
        self.notice.is_some() || self.show_clear_confirm || self.pending_delete.is_some()
    }

    pub(crate) fn load_catalog(&mut self, category: Option<String>) {
        self.screen = Screen::Catalog;
        self.loading.catalog = true;
        self.requests.send(Request::Catalog { category });
    }

    pub(crate) fn open_page(&mut self, id: String) {
        self.screen = Screen::Canvas;
        self.editor = None;
        self.loading.page = true;
        self.requests.send(Request::OpenPage { id });
    }

    pub(crate) fn load_gallery(&mut self) {
        self.screen = Screen::Gallery;
        self.loading.gallery = true;
        self.requests.send(Request::Gallery);
    }

    /// Renders the current composition and submits it once.
    pub(crate) fn save_to_gallery(&mut self) {
        let Some(editor) = &self.editor else {
            return;
        };
        if !self.loading.save.try_begin(editor.session()) {
            return;
        }
        match save::prepare_save(editor, Local::now()) {
            Ok(artwork) => self.requests.send(Request::Save(artwork)),
            Err(err) => {
                self.loading.save.finish();
                warn!("could not prepare snapshot: {err}");
                self.notice = Some(Notice::failed("Save", &err));
            }
        }
    }

    pub(crate) fn delete(&mut self, id: String) {
        if self.loading.deleting.insert(id.clone()) {
            self.requests.send(Request::Delete { id });
        }
    }

    pub(crate) fn export(&mut self, id: &str) {
        let Some(artwork) = self.gallery.get(id) else {
            return;
        };

        #[cfg(not(target_arch = "wasm32"))]
        let result = crate::export::export_to_dir(artwork, &self.config.export_dir)
            .map(|path| format!("Saved to {}", path.display()));
        #[cfg(target_arch = "wasm32")]
        let result = crate::export::download(artwork).map(|()| "Download started.".to_owned());

        self.notice = Some(match result {
            Ok(message) => Notice::info("Exported", message),
            Err(err) => Notice::failed("Export", &err),
        });
    }

    pub(crate) fn notify_info(&mut self, title: &str, message: &str) {
        self.notice = Some(Notice::info(title, message));
    }

    fn start_editor(&mut self, page: Arc<Page>) {
        let brush = self.preferences.palette.brush();
        self.editor = Some(EditorState::new(page, brush, self.config.editor_settings()));
        self.screen = Screen::Canvas;
    }

    fn handle_response(&mut self, response: Response) {
        match response {
            Response::Catalog(result) => {
                self.loading.catalog = false;
                match result {
                    Ok(contents) => self.catalog.replace(contents),
                    Err(err) => self.notice = Some(Notice::failed("Loading pages", &err)),
                }
            }
            Response::PageOpened(result) => {
                self.loading.page = false;
                match result {
                    Ok(page) if self.screen == Screen::Canvas => self.start_editor(page),
                    Ok(page) => info!("ignoring page {} opened after leaving the canvas", page.id),
                    Err(err) => self.notice = Some(Notice::failed("Opening the page", &err)),
                }
            }
            Response::Saved(result) => {
                let saved_from = self.loading.save.finish();
                match result {
                    Ok(artwork) => {
                        if let (Some(editor), Some(session)) = (self.editor.as_mut(), saved_from) {
                            save::reset_title_after_save(editor, session);
                        }
                        self.notice = Some(
                            Notice::info("Saved", format!("\"{}\" is in your gallery.", artwork.display_title()))
                                .with_action(NoticeAction::OpenGallery),
                        );
                    }
                    Err(err) => self.notice = Some(Notice::failed("Save", &err)),
                }
            }
            Response::Gallery(result) => {
                self.loading.gallery = false;
                match result {
                    Ok(items) => self.gallery.replace(items),
                    Err(err) => self.notice = Some(Notice::failed("Loading the gallery", &err)),
                }
            }
            Response::Deleted { id, result } => {
                self.loading.deleting.remove(&id);
                match result {
                    Ok(()) => {
                        self.gallery.remove_confirmed(&id);
                        self.renderer.forget_artwork(&id);
                    }
                    Err(err) => self.notice = Some(Notice::failed("Delete", &err)),
                }
            }
        }
    }

    fn navigation_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                if ui.selectable_label(self.screen == Screen::Catalog, "📖 Pages").clicked() {
                    let category = self.catalog.category().map(str::to_owned);
                    self.load_catalog(category);
                }
                if self.editor.is_some()
                    && ui.selectable_label(self.screen == Screen::Canvas, "🖌 Canvas").clicked()
                {
                    self.screen = Screen::Canvas;
                }
                if ui.selectable_label(self.screen == Screen::Gallery, "🖼 Gallery").clicked() {
                    self.load_gallery();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.requests.base_url());
                });
            });
        });
    }

    fn dialogs(&mut self, ctx: &egui::Context) {
        if let Some(notice) = self.notice.clone() {
            let mut close = false;
            let mut open_gallery = false;
            dialog(ctx, &notice.title).show(ctx, |ui| {
                match notice.kind {
                    NoticeKind::Info => ui.label(&notice.message),
                    NoticeKind::Error => ui.colored_label(ui.visuals().error_fg_color, &notice.message),
                    NoticeKind::Permission => ui.colored_label(ui.visuals().warn_fg_color, &notice.message),
                };
                ui.horizontal(|ui| {
                    if notice.action == Some(NoticeAction::OpenGallery) && ui.button("Open gallery").clicked() {
                        open_gallery = true;
                    }
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            });
            if close || open_gallery {
                self.notice = None;
            }
            if open_gallery {
                self.load_gallery();
            }
        }

        if self.show_clear_confirm {
            let mut answer = None;
            dialog(ctx, "Clear the canvas?").show(ctx, |ui| {
                ui.label("All strokes and stickers will be removed. This cannot be undone.");
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });
            if let Some(confirmed) = answer {
                self.show_clear_confirm = false;
                if confirmed {
                    if let Some(editor) = self.editor.as_mut() {
                        editor.apply(Command::Clear);
                    }
                }
            }
        }

        if let Some(id) = self.pending_delete.clone() {
            let mut answer = None;
            dialog(ctx, "Delete artwork?").show(ctx, |ui| {
                ui.label("The picture will be removed from your gallery.");
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });
            if let Some(confirmed) = answer {
                self.pending_delete = None;
                if confirmed {
                    self.delete(id);
                }
            }
        }
    }
}

fn dialog(ctx: &egui::Context, title: &str) -> egui::Window<'static> {
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(ctx.screen_rect().width().min(360.0))
}

impl eframe::App for ColoringApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.preferences);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for response in self.requests.poll() {
            self.handle_response(response);
        }
        self.renderer.begin_frame();

        self.navigation_bar(ctx);
        match self.screen {
            Screen::Catalog => panels::catalog_panel(self, ctx),
            Screen::Canvas => {
                panels::tools_panel(self, ctx);
                panels::canvas_panel(self, ctx);
            }
            Screen::Gallery => panels::gallery_panel(self, ctx),
        }
        self.dialogs(ctx);
    }
}
