use std::sync::Arc;

use egui::{Pos2, Rect, Vec2};
use uuid::Uuid;

use crate::api::StickerTemplate;

pub type StickerRef = Arc<StickerTemplate>;

/// A sticker stamped onto the canvas.
///
/// `position` is the top-left corner of the square the sticker is fitted into,
/// `size` its edge length, both in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct StickerPlacement {
    id: Uuid,
    template: StickerRef,
    position: Pos2,
    size: f32,
}

impl StickerPlacement {
    pub fn new(template: StickerRef, position: Pos2, size: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            template,
            position,
            size,
        }
    }

    /// Places the sticker so that it is centered on `center`.
    pub fn centered(template: StickerRef, center: Pos2, size: f32) -> Self {
        Self::new(template, center - Vec2::splat(size / 2.0), size)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn template(&self) -> &StickerTemplate {
        &self.template
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, Vec2::splat(self.size))
    }
}
