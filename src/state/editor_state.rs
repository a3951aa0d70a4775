use std::sync::Arc;

use log::{debug, info};
use uuid::Uuid;

use crate::api::Page;
use crate::command::Command;
use crate::document::{Document, Undone};
use crate::geometry::CanvasSize;
use crate::palette::Brush;
use crate::sticker::StickerPlacement;
use crate::stroke::StrokeBuilder;

use super::gesture::{GestureState, Transition};

/// Editor options taken from the app config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    pub canvas: CanvasSize,
    pub sticker_size: f32,
    pub stroke_tolerance: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            sticker_size: 96.0,
            stroke_tolerance: 0.0,
        }
    }
}

/// Everything the canvas screen edits, as one value.
///
/// All changes go through [`EditorState::handle`] (by value) or
/// [`EditorState::apply`] (in place), so a session can be replayed in tests
/// from a list of [`Command`]s without any UI.
#[derive(Debug, Clone)]
pub struct EditorState {
    session: Uuid,
    document: Document,
    gesture: GestureState,
    brush: Brush,
    title: String,
    settings: EditorSettings,
}

impl EditorState {
    pub fn new(page: Arc<Page>, brush: Brush, settings: EditorSettings) -> Self {
        Self {
            session: Uuid::new_v4(),
            document: Document::new(page),
            gesture: GestureState::Idle,
            brush,
            title: String::new(),
            settings,
        }
    }

    /// Applies `command` and returns the resulting state.
    #[must_use]
    pub fn handle(mut self, command: Command) -> Self {
        self.apply(command);
        self
    }

    pub fn apply(&mut self, command: Command) {
        if command.edits_document() {
            debug!("editor command: {}", command.name());
        }

        match command {
            Command::PointerDown(point) => {
                let Transition { state, committed } = std::mem::take(&mut self.gesture).begin(
                    self.brush,
                    point,
                    self.settings.stroke_tolerance,
                );
                self.gesture = state;
                if let Some(stroke) = committed {
                    self.document.add_stroke(stroke);
                }
            }
            Command::PointerMove(point) => {
                self.gesture = std::mem::take(&mut self.gesture).extend(point);
            }
            Command::PointerUp => {
                let Transition { state, committed } = std::mem::take(&mut self.gesture).end();
                self.gesture = state;
                if let Some(stroke) = committed {
                    debug!("committed stroke with {} points", stroke.points().len());
                    self.document.add_stroke(stroke);
                }
            }
            Command::SelectBrush(brush) => {
                self.brush = brush;
            }
            Command::PlaceSticker { template, position } => {
                let size = self.settings.sticker_size;
                let placement = match position {
                    Some(position) => StickerPlacement::new(template, position, size),
                    None => StickerPlacement::centered(template, self.settings.canvas.center(), size),
                };
                info!("placed sticker {} at {:?}", placement.template().id, placement.position());
                self.document.add_sticker(placement);
            }
            Command::Undo => match self.document.undo() {
                Some(Undone::Stroke(_)) => info!("undo: removed last stroke"),
                Some(Undone::Sticker(_)) => info!("undo: removed last sticker"),
                None => debug!("undo: nothing to remove"),
            },
            Command::Clear => {
                self.gesture = std::mem::take(&mut self.gesture).cancel();
                self.document.clear();
            }
            Command::SetTitle(title) => {
                self.title = title;
            }
        }
    }

    /// Identifies this editing session; a reopened page gets a new one.
    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn page(&self) -> &Page {
        self.document.page()
    }

    /// The stroke being drawn right now, if any.
    pub fn in_progress(&self) -> Option<&StrokeBuilder> {
        self.gesture.in_progress()
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_drawing()
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Mutable access for binding the title to a text field.
    pub fn title_mut(&mut self) -> &mut String {
        &mut self.title
    }

    pub fn canvas(&self) -> CanvasSize {
        self.settings.canvas
    }
}
