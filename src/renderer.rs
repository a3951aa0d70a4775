use egui::{Color32, Context, Painter, Pos2, Rect, Shape, TextureId};

use crate::api::{Artwork, Page};
use crate::geometry::{CanvasSize, CanvasView};
use crate::sticker::StickerPlacement;
use crate::state::EditorState;
use crate::texture_manager::{self, TextureKey, TextureManager};

const UV_FULL: Rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
const THUMBNAIL_SIDE: u32 = 256;

/// Paints the editor canvas and gallery thumbnails.
///
/// Layer order matches [`crate::snapshot::Snapshot::render`].
pub struct Renderer {
    textures: TextureManager,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            textures: TextureManager::new(64),
        }
    }

    pub fn begin_frame(&mut self) {
        self.textures.begin_frame();
    }

    pub fn render_canvas(&mut self, ctx: &Context, painter: &Painter, view: CanvasView, editor: &EditorState) {
        let painter = painter.with_clip_rect(view.screen_rect());
        painter.rect_filled(view.screen_rect(), 0.0, Color32::WHITE);

        let page = editor.page();
        let canvas = editor.canvas();
        let outline = self.textures.get_or_create(ctx, TextureKey::Page(page.id.clone()), || {
            texture_manager::svg_image(&page.svg, &format!("page {}", page.id), canvas)
        });
        if let Some(texture) = outline {
            painter.image(texture, view.screen_rect(), UV_FULL, Color32::WHITE);
        }

        for stroke in editor.document().strokes() {
            paint_path(&painter, view, stroke.points(), stroke.color(), stroke.width());
        }
        if let Some(open) = editor.in_progress() {
            paint_path(&painter, view, open.points(), open.color(), open.width());
        }

        for sticker in editor.document().stickers() {
            if let Some(texture) = self.sticker_texture(ctx, view, sticker) {
                painter.image(texture, view.rect_to_screen(sticker.rect()), UV_FULL, Color32::WHITE);
            }
        }
    }

    fn sticker_texture(&mut self, ctx: &Context, view: CanvasView, sticker: &StickerPlacement) -> Option<TextureId> {
        let template = sticker.template();
        let pixels = (sticker.size() * view.scale() * ctx.pixels_per_point()).round().max(1.0) as u32;
        let key = TextureKey::Sticker {
            id: template.id.clone(),
            pixels,
        };
        self.textures.get_or_create(ctx, key, || {
            texture_manager::svg_image(
                &template.svg,
                &format!("sticker {}", template.id),
                CanvasSize {
                    width: pixels,
                    height: pixels,
                },
            )
        })
    }

    /// Texture for a sticker button in the tray.
    pub fn sticker_icon(&mut self, ctx: &Context, id: &str, svg: &str, pixels: u32) -> Option<TextureId> {
        let key = TextureKey::Sticker {
            id: id.to_owned(),
            pixels,
        };
        self.textures.get_or_create(ctx, key, || {
            texture_manager::svg_image(
                svg,
                &format!("sticker {id}"),
                CanvasSize {
                    width: pixels,
                    height: pixels,
                },
            )
        })
    }

    pub fn page_thumbnail(&mut self, ctx: &Context, page: &Page) -> Option<TextureId> {
        self.textures.get_or_create(ctx, TextureKey::PageThumbnail(page.id.clone()), || {
            texture_manager::svg_image(
                &page.svg,
                &format!("page {}", page.id),
                CanvasSize {
                    width: THUMBNAIL_SIDE,
                    height: THUMBNAIL_SIDE,
                },
            )
        })
    }

    pub fn thumbnail(&mut self, ctx: &Context, artwork: &Artwork) -> Option<TextureId> {
        self.textures.get_or_create(ctx, TextureKey::Artwork(artwork.id.clone()), || {
            texture_manager::thumbnail_image(&artwork.image_data, THUMBNAIL_SIDE)
        })
    }

    pub fn forget_artwork(&mut self, id: &str) {
        self.textures.invalidate(&TextureKey::Artwork(id.to_owned()));
    }
}

fn paint_path(painter: &Painter, view: CanvasView, points: &[Pos2], color: Color32, width: f32) {
    let points: Vec<Pos2> = points.iter().map(|p| view.to_screen(*p)).collect();
    painter.extend(path_shapes(points, color, width * view.scale()));
}

/// Shapes for one stroke in screen space.
///
/// Every vertex gets a disc, which gives the round caps and round joins the
/// snapshot rasterizer uses.
fn path_shapes(points: Vec<Pos2>, color: Color32, width: f32) -> Vec<Shape> {
    let radius = width / 2.0;
    let mut shapes: Vec<Shape> = points
        .iter()
        .map(|point| Shape::circle_filled(*point, radius, color))
        .collect();
    if points.len() > 1 {
        shapes.push(Shape::line(points, egui::Stroke::new(width, color)));
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_vertex_gets_a_round_join() {
        let points = vec![Pos2::new(0.0, 0.0), Pos2::new(50.0, 0.0), Pos2::new(0.0, 10.0)];
        let shapes = path_shapes(points.clone(), Color32::RED, 24.0);

        let discs: Vec<Pos2> = shapes
            .iter()
            .filter_map(|shape| match shape {
                Shape::Circle(circle) => {
                    assert_eq!(circle.radius, 12.0);
                    Some(circle.center)
                }
                _ => None,
            })
            .collect();
        assert_eq!(discs, points);
        assert!(matches!(shapes.last(), Some(Shape::Path(path)) if path.points == points));
    }

    #[test]
    fn a_single_point_is_just_a_dot() {
        let shapes = path_shapes(vec![Pos2::new(3.0, 4.0)], Color32::BLUE, 6.0);
        assert_eq!(shapes.len(), 1);
        assert!(matches!(&shapes[0], Shape::Circle(circle) if circle.radius == 3.0));
        assert!(path_shapes(Vec::new(), Color32::BLUE, 6.0).is_empty());
    }
}
