use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the drawing surface and of the saved snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 1000,
        }
    }
}

impl CanvasSize {
    pub fn vec2(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.vec2())
    }

    pub fn center(&self) -> Pos2 {
        self.rect().center()
    }
}

/// Largest rect with the aspect ratio of `content` that fits in `target`, centered.
///
/// Used for the page outline and for stickers, both on screen and in snapshots.
pub fn fit_contain(content: Vec2, target: Rect) -> Rect {
    if content.x <= 0.0 || content.y <= 0.0 {
        return target;
    }
    let scale = (target.width() / content.x).min(target.height() / content.y);
    Rect::from_center_size(target.center(), content * scale)
}

/// Maps between canvas pixels and the screen rect the canvas is shown in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    screen_rect: Rect,
    scale: f32,
}

impl CanvasView {
    /// Fits `canvas` into `available`, preserving its aspect ratio.
    pub fn fit(canvas: CanvasSize, available: Rect) -> Self {
        let screen_rect = fit_contain(canvas.vec2(), available);
        let scale = screen_rect.width() / canvas.width.max(1) as f32;
        Self { screen_rect, scale }
    }

    pub fn screen_rect(&self) -> Rect {
        self.screen_rect
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_screen(&self, canvas_pos: Pos2) -> Pos2 {
        self.screen_rect.min + canvas_pos.to_vec2() * self.scale
    }

    pub fn to_canvas(&self, screen_pos: Pos2) -> Pos2 {
        ((screen_pos - self.screen_rect.min) / self.scale).to_pos2()
    }

    pub fn rect_to_screen(&self, canvas_rect: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(canvas_rect.min), self.to_screen(canvas_rect.max))
    }

    pub fn contains(&self, screen_pos: Pos2) -> bool {
        self.screen_rect.contains(screen_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_contain_letterboxes_wide_content() {
        let target = Rect::from_min_size(Pos2::ZERO, Vec2::new(100.0, 100.0));
        let fitted = fit_contain(Vec2::new(200.0, 100.0), target);
        assert_eq!(fitted.width(), 100.0);
        assert_eq!(fitted.height(), 50.0);
        assert_eq!(fitted.center(), Pos2::new(50.0, 50.0));
    }

    #[test]
    fn view_round_trips_canvas_positions() {
        let canvas = CanvasSize {
            width: 400,
            height: 500,
        };
        let available = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(800.0, 500.0));
        let view = CanvasView::fit(canvas, available);

        assert!((view.scale() - 1.0).abs() < 1e-6);
        let screen = view.to_screen(Pos2::new(100.0, 250.0));
        let back = view.to_canvas(screen);
        assert!((back.x - 100.0).abs() < 1e-4);
        assert!((back.y - 250.0).abs() < 1e-4);
    }
}
