use std::collections::{HashMap, HashSet};

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use log::{info, warn};
use resvg::tiny_skia::Pixmap;
use thiserror::Error;

use crate::geometry::CanvasSize;
use crate::snapshot::{self, SnapshotError};

/// Errors that can occur while producing a texture image
#[derive(Error, Debug)]
pub enum TextureGenerationError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// What a cached texture shows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextureKey {
    /// A page outline rasterized at canvas resolution.
    Page(String),
    /// A small page preview for the catalog.
    PageThumbnail(String),
    /// A sticker rasterized at an on-screen pixel size.
    Sticker { id: String, pixels: u32 },
    /// A gallery thumbnail decoded from the stored PNG.
    Artwork(String),
}

/// Caches rasterized SVGs and decoded thumbnails as GPU textures.
///
/// Least recently used textures are dropped once `max_cache_size` is reached.
/// Keys that failed to generate are remembered and not retried every frame.
pub struct TextureManager {
    texture_cache: HashMap<TextureKey, TextureHandle>,
    last_used: HashMap<TextureKey, u64>,
    failed: HashSet<TextureKey>,
    current_frame: u64,
    max_cache_size: usize,
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            failed: HashSet::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Should be called at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Returns the cached texture for `key`, creating it with `generator` on a miss.
    ///
    /// Returns `None` if generation failed, now or on an earlier frame.
    pub fn get_or_create<F>(&mut self, ctx: &Context, key: TextureKey, generator: F) -> Option<TextureId>
    where
        F: FnOnce() -> Result<ColorImage, TextureGenerationError>,
    {
        if let Some(handle) = self.texture_cache.get(&key) {
            self.last_used.insert(key, self.current_frame);
            return Some(handle.id());
        }
        if self.failed.contains(&key) {
            return None;
        }

        let image = match generator() {
            Ok(image) => image,
            Err(err) => {
                warn!("texture {key:?} could not be generated: {err}");
                self.failed.insert(key);
                return None;
            }
        };

        self.make_room();
        let name = format!("{key:?}");
        let handle = ctx.load_texture(name, image, TextureOptions::LINEAR);
        let id = handle.id();
        self.texture_cache.insert(key.clone(), handle);
        self.last_used.insert(key, self.current_frame);
        Some(id)
    }

    /// Evicts least recently used entries until one more texture fits.
    fn make_room(&mut self) {
        while self.texture_cache.len() >= self.max_cache_size {
            let oldest = self
                .last_used
                .iter()
                .min_by_key(|(_, frame)| **frame)
                .map(|(key, _)| key.clone());
            let Some(oldest) = oldest else {
                break;
            };
            info!("evicting texture {oldest:?}");
            self.texture_cache.remove(&oldest);
            self.last_used.remove(&oldest);
        }
    }

    pub fn invalidate(&mut self, key: &TextureKey) {
        self.texture_cache.remove(key);
        self.last_used.remove(key);
        self.failed.remove(key);
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    #[cfg(test)]
    fn contains(&self, key: &TextureKey) -> bool {
        self.texture_cache.contains_key(key)
    }
}

pub fn pixmap_to_image(pixmap: &Pixmap) -> ColorImage {
    ColorImage::from_rgba_premultiplied(
        [pixmap.width() as usize, pixmap.height() as usize],
        pixmap.data(),
    )
}

pub fn svg_image(svg: &str, what: &str, size: CanvasSize) -> Result<ColorImage, TextureGenerationError> {
    let pixmap = snapshot::rasterize_svg(svg, what, size)?;
    Ok(pixmap_to_image(&pixmap))
}

/// Decodes stored base64 PNG data into a thumbnail no larger than `max_side`.
pub fn thumbnail_image(image_data: &str, max_side: u32) -> Result<ColorImage, TextureGenerationError> {
    let png = snapshot::decode_image_data(image_data)?;
    let image = image::load_from_memory(&png)?.thumbnail(max_side, max_side);
    let size = [image.width() as usize, image.height() as usize];
    Ok(ColorImage::from_rgba_unmultiplied(size, &image.to_rgba8()))
}
