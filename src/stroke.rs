use egui::{Color32, Pos2};

use crate::palette::Brush;

/// A committed freehand stroke.
///
/// Always holds at least one point. Color and width are copied from the brush
/// when the stroke is started and never change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
}

impl Stroke {
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// A stroke made of a single tap, painted as a dot.
    pub fn is_dot(&self) -> bool {
        self.points.len() == 1
    }
}

// In-progress stroke, owned by the gesture state machine until release
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeBuilder {
    points: Vec<Pos2>,
    color: Color32,
    width: f32,
    tolerance: f32,
}

impl StrokeBuilder {
    /// Opens a path at `start` with the brush captured by value.
    pub fn new(brush: Brush, start: Pos2, tolerance: f32) -> Self {
        Self {
            points: vec![start],
            color: brush.color,
            width: brush.width,
            tolerance: tolerance.max(0.0),
        }
    }

    /// Appends a pointer position. With a tolerance of zero every point is kept.
    pub fn add_point(&mut self, point: Pos2) {
        if self.tolerance > 0.0 {
            if let Some(last) = self.points.last() {
                if last.distance(point) < self.tolerance {
                    return;
                }
            }
        }
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn finish(self) -> Stroke {
        Stroke {
            points: self.points,
            color: self.color,
            width: self.width,
        }
    }
}
