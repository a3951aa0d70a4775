//! Freehand gesture capture as a two-state machine.
//!
//! ```text
//!   ┌──────────┐  begin   ┌─────────────┐
//!   │          ├──────────►             ├──┐ extend
//!   │   Idle   │          │   Drawing   ◄──┘
//!   │          ◄──────────┤             ├──┐ begin (commits, reopens)
//!   └──────────┘   end    └─────────────┘◄─┘
//! ```
//!
//! Transitions consume the current state and hand back the next one, plus the
//! stroke released by the transition if there is one. Nothing here knows about
//! pointer events or any UI toolkit.
use egui::Pos2;

use crate::palette::Brush;
use crate::stroke::{Stroke, StrokeBuilder};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing(StrokeBuilder),
}

/// Outcome of a transition that may release a finished stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: GestureState,
    pub committed: Option<Stroke>,
}

impl GestureState {
    /// Opens a new path. A path still open from an earlier gesture is committed first.
    pub fn begin(self, brush: Brush, point: Pos2, tolerance: f32) -> Transition {
        let committed = match self {
            GestureState::Drawing(previous) => Some(previous.finish()),
            GestureState::Idle => None,
        };
        Transition {
            state: GestureState::Drawing(StrokeBuilder::new(brush, point, tolerance)),
            committed,
        }
    }

    /// Appends to the open path; ignored while idle.
    pub fn extend(self, point: Pos2) -> GestureState {
        match self {
            GestureState::Drawing(mut builder) => {
                builder.add_point(point);
                GestureState::Drawing(builder)
            }
            GestureState::Idle => GestureState::Idle,
        }
    }

    /// Closes the open path, releasing it as an immutable stroke.
    pub fn end(self) -> Transition {
        Transition {
            committed: match self {
                GestureState::Drawing(builder) => Some(builder.finish()),
                GestureState::Idle => None,
            },
            state: GestureState::Idle,
        }
    }

    /// Drops the open path without committing it.
    pub fn cancel(self) -> GestureState {
        GestureState::Idle
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, GestureState::Drawing(_))
    }

    pub fn in_progress(&self) -> Option<&StrokeBuilder> {
        match self {
            GestureState::Drawing(builder) => Some(builder),
            GestureState::Idle => None,
        }
    }
}
