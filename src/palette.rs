use egui::Color32;

/// Color and line width applied to strokes started from now on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color32,
    pub width: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: PALETTE[0].color,
            width: BRUSH_WIDTHS[1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    pub name: &'static str,
    pub color: Color32,
}

const fn swatch(name: &'static str, r: u8, g: u8, b: u8) -> Swatch {
    Swatch {
        name,
        color: Color32::from_rgb(r, g, b),
    }
}

pub const PALETTE: [Swatch; 12] = [
    swatch("Red", 229, 57, 53),
    swatch("Orange", 251, 140, 0),
    swatch("Yellow", 253, 216, 53),
    swatch("Lime", 124, 179, 66),
    swatch("Green", 46, 125, 50),
    swatch("Teal", 0, 137, 123),
    swatch("Sky", 3, 169, 244),
    swatch("Blue", 30, 136, 229),
    swatch("Purple", 142, 36, 170),
    swatch("Pink", 236, 64, 122),
    swatch("Brown", 109, 76, 65),
    swatch("Black", 33, 33, 33),
];

/// Brush widths in canvas pixels.
pub const BRUSH_WIDTHS: [f32; 4] = [2.0, 6.0, 12.0, 24.0];

/// Index-based selection so it can be persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PaletteSelection {
    pub color_index: usize,
    pub brush_index: usize,
}

impl Default for PaletteSelection {
    fn default() -> Self {
        Self {
            color_index: 0,
            brush_index: 1,
        }
    }
}

impl PaletteSelection {
    /// Resolves the selection, falling back to the defaults for out-of-range indices.
    pub fn brush(&self) -> Brush {
        let defaults = Brush::default();
        Brush {
            color: PALETTE
                .get(self.color_index)
                .map_or(defaults.color, |swatch| swatch.color),
            width: BRUSH_WIDTHS
                .get(self.brush_index)
                .copied()
                .unwrap_or(defaults.width),
        }
    }
}
