use std::sync::Arc;

use log::info;

use crate::api::Page;
use crate::sticker::StickerPlacement;
use crate::stroke::Stroke;

/// What an undo removed.
#[derive(Debug, Clone, PartialEq)]
pub enum Undone {
    Stroke(Stroke),
    Sticker(StickerPlacement),
}

/// Strokes and stickers layered over a coloring page.
///
/// Paint order is the page outline, then strokes, then stickers, each list in
/// insertion order. Entries are never edited once pushed; the only way out is
/// [`Document::undo`] or [`Document::clear`].
#[derive(Debug, Clone)]
pub struct Document {
    page: Arc<Page>,
    strokes: Vec<Stroke>,
    stickers: Vec<StickerPlacement>,
}

impl Document {
    pub fn new(page: Arc<Page>) -> Self {
        Self {
            page,
            strokes: Vec::new(),
            stickers: Vec::new(),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stickers(&self) -> &[StickerPlacement] {
        &self.stickers
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.stickers.is_empty()
    }

    pub fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn add_sticker(&mut self, sticker: StickerPlacement) {
        self.stickers.push(sticker);
    }

    /// Removes the newest stroke, or the newest sticker when there are no strokes.
    pub fn undo(&mut self) -> Option<Undone> {
        if let Some(stroke) = self.strokes.pop() {
            return Some(Undone::Stroke(stroke));
        }
        self.stickers.pop().map(Undone::Sticker)
    }

    pub fn clear(&mut self) {
        info!(
            "clearing {} strokes and {} stickers",
            self.strokes.len(),
            self.stickers.len()
        );
        self.strokes.clear();
        self.stickers.clear();
    }
}
