//! Flattening a [`Document`] into a PNG.
//!
//! Layers are drawn bottom to top: white paper, the page outline, strokes,
//! stickers. The on-screen renderer paints the same layers with the same
//! fitting rules, so what is saved is what was shown.

use std::collections::HashMap;

use egui::{Pos2, Rect, Vec2};
use log::debug;
use resvg::tiny_skia::{
    self, Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform,
};
use resvg::usvg;
use thiserror::Error;

use crate::document::Document;
use crate::geometry::{CanvasSize, fit_contain};
use crate::stroke::Stroke;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("a {width}x{height} canvas cannot be rendered")]
    InvalidSize { width: u32, height: u32 },

    #[error("invalid SVG for {what}: {message}")]
    Svg { what: String, message: String },

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("image data is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A rendered composition at canvas resolution.
pub struct Snapshot {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl Snapshot {
    pub fn render(document: &Document, canvas: CanvasSize) -> Result<Self, SnapshotError> {
        let mut pixmap = new_pixmap(canvas)?;
        pixmap.fill(Color::WHITE);

        let page = document.page();
        let outline = parse_svg(&page.svg, &format!("page {}", page.id))?;
        draw_svg(&mut pixmap, &outline, canvas.rect());

        for stroke in document.strokes() {
            draw_stroke(&mut pixmap, stroke);
        }

        let mut trees: HashMap<&str, usvg::Tree> = HashMap::new();
        for sticker in document.stickers() {
            let template = sticker.template();
            if !trees.contains_key(template.id.as_str()) {
                let tree = parse_svg(&template.svg, &format!("sticker {}", template.id))?;
                trees.insert(template.id.as_str(), tree);
            }
            if let Some(tree) = trees.get(template.id.as_str()) {
                draw_svg(&mut pixmap, tree, sticker.rect());
            }
        }

        debug!(
            "rendered snapshot {}x{} ({} strokes, {} stickers)",
            canvas.width,
            canvas.height,
            document.strokes().len(),
            document.stickers().len()
        );
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, SnapshotError> {
        self.pixmap
            .encode_png()
            .map_err(|err| SnapshotError::Encode(err.to_string()))
    }

    /// PNG bytes as base64 text, ready to upload.
    pub fn encode_base64(&self) -> Result<String, SnapshotError> {
        let png = self.encode_png()?;
        debug!("encoded snapshot: {} PNG bytes", png.len());
        Ok(base64::encode(png))
    }
}

pub fn data_uri(base64_png: &str) -> String {
    if base64_png.starts_with(PNG_DATA_URI_PREFIX) {
        base64_png.to_owned()
    } else {
        format!("{PNG_DATA_URI_PREFIX}{base64_png}")
    }
}

/// Decodes stored image data, with or without a data URI prefix.
pub fn decode_image_data(data: &str) -> Result<Vec<u8>, SnapshotError> {
    let payload = data.strip_prefix(PNG_DATA_URI_PREFIX).unwrap_or(data);
    Ok(base64::decode(payload.trim())?)
}

/// Rasterizes an SVG fitted into a `size` pixmap with a transparent background.
pub fn rasterize_svg(svg: &str, what: &str, size: CanvasSize) -> Result<Pixmap, SnapshotError> {
    let tree = parse_svg(svg, what)?;
    let mut pixmap = new_pixmap(size)?;
    draw_svg(&mut pixmap, &tree, size.rect());
    Ok(pixmap)
}

fn new_pixmap(size: CanvasSize) -> Result<Pixmap, SnapshotError> {
    Pixmap::new(size.width, size.height).ok_or(SnapshotError::InvalidSize {
        width: size.width,
        height: size.height,
    })
}

fn parse_svg(svg: &str, what: &str) -> Result<usvg::Tree, SnapshotError> {
    usvg::Tree::from_data(svg.as_bytes(), &Default::default(), &Default::default()).map_err(
        |err| SnapshotError::Svg {
            what: what.to_owned(),
            message: err.to_string(),
        },
    )
}

fn draw_svg(pixmap: &mut Pixmap, tree: &usvg::Tree, target: Rect) {
    let size = tree.size();
    let content = Vec2::new(size.width(), size.height());
    let fitted = fit_contain(content, target);
    let transform = Transform::from_translate(fitted.min.x, fitted.min.y)
        .pre_scale(fitted.width() / content.x, fitted.height() / content.y);
    resvg::render(tree, transform, &mut pixmap.as_mut());
}

fn draw_stroke(pixmap: &mut Pixmap, stroke: &Stroke) {
    let [r, g, b, a] = stroke.color().to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    let points = stroke.points();
    let path = if stroke.is_dot() {
        None
    } else {
        let mut builder = PathBuilder::new();
        builder.move_to(points[0].x, points[0].y);
        for point in &points[1..] {
            builder.line_to(point.x, point.y);
        }
        builder.finish()
    };

    match path {
        Some(path) => {
            let line = tiny_skia::Stroke {
                width: stroke.width(),
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Default::default()
            };
            pixmap.stroke_path(&path, &paint, &line, Transform::identity(), None);
        }
        // a tap, or a drag that never left its starting pixel
        None => draw_dot(pixmap, points[0], stroke.width(), &paint),
    }
}

fn draw_dot(pixmap: &mut Pixmap, center: Pos2, width: f32, paint: &Paint<'_>) {
    if let Some(circle) = PathBuilder::from_circle(center.x, center.y, width / 2.0) {
        pixmap.fill_path(&circle, paint, FillRule::Winding, Transform::identity(), None);
    }
}
