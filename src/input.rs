use egui::{Context, PointerButton, Pos2};

use crate::command::Command;
use crate::geometry::CanvasView;

/// Represents the location where an input event occurred
#[derive(Debug, Clone, Copy)]
pub struct InputLocation {
    /// The position in screen coordinates
    pub position: Pos2,
    /// Whether this position is within the canvas bounds
    pub is_in_canvas: bool,
}

/// Primary-pointer events relevant to drawing. Touch arrives here as pointer input.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    PointerDown { location: InputLocation },
    PointerMove { location: InputLocation },
    PointerUp { location: InputLocation },
    /// The pointer vanished (left the window, or a finger was lifted off-screen)
    PointerLeave,
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    pressed_in_canvas: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn make_location(view: &CanvasView, pos: Pos2) -> InputLocation {
        InputLocation {
            position: pos,
            is_in_canvas: view.contains(pos),
        }
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context, view: &CanvasView) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let pointer = &input.pointer;

            if pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = pointer.interact_pos() {
                    events.push(InputEvent::PointerDown {
                        location: Self::make_location(view, pos),
                    });
                }
            }

            match pointer.hover_pos() {
                Some(pos) => {
                    if Some(pos) != self.last_pointer_pos && pointer.button_down(PointerButton::Primary) {
                        events.push(InputEvent::PointerMove {
                            location: Self::make_location(view, pos),
                        });
                    }
                    self.last_pointer_pos = Some(pos);
                }
                None => {
                    if self.last_pointer_pos.take().is_some() {
                        events.push(InputEvent::PointerLeave);
                    }
                }
            }

            if pointer.button_released(PointerButton::Primary) {
                let pos = pointer.interact_pos().or(self.last_pointer_pos).unwrap_or(Pos2::ZERO);
                events.push(InputEvent::PointerUp {
                    location: Self::make_location(view, pos),
                });
            }
        });

        events
    }

    /// Translates one event into an editor command.
    ///
    /// Only a press inside the canvas starts a stroke; once started, moves and
    /// the release are forwarded even if the pointer has wandered outside.
    pub fn route_event(&mut self, event: &InputEvent, view: &CanvasView) -> Option<Command> {
        match *event {
            InputEvent::PointerDown { location } => {
                self.pressed_in_canvas = location.is_in_canvas;
                location
                    .is_in_canvas
                    .then(|| Command::PointerDown(view.to_canvas(location.position)))
            }
            InputEvent::PointerMove { location } => self
                .pressed_in_canvas
                .then(|| Command::PointerMove(view.to_canvas(location.position))),
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                std::mem::take(&mut self.pressed_in_canvas).then_some(Command::PointerUp)
            }
        }
    }

    /// Convenience: read this frame's input and translate it into commands.
    pub fn commands(&mut self, ctx: &Context, view: &CanvasView) -> Vec<Command> {
        self.process_input(ctx, view)
            .iter()
            .filter_map(|event| self.route_event(event, view))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use egui::{Rect, Vec2};

    use super::*;
    use crate::geometry::CanvasSize;

    fn view() -> CanvasView {
        CanvasView::fit(
            CanvasSize {
                width: 100,
                height: 100,
            },
            Rect::from_min_size(Pos2::new(50.0, 0.0), Vec2::new(200.0, 200.0)),
        )
    }

    fn at(x: f32, y: f32) -> InputLocation {
        InputLocation {
            position: Pos2::new(x, y),
            is_in_canvas: view().contains(Pos2::new(x, y)),
        }
    }

    #[test]
    fn press_outside_canvas_is_ignored_until_release() {
        let mut handler = InputHandler::new();
        let view = view();

        assert_eq!(handler.route_event(&InputEvent::PointerDown { location: at(10.0, 10.0) }, &view), None);
        assert_eq!(handler.route_event(&InputEvent::PointerMove { location: at(100.0, 100.0) }, &view), None);
        assert_eq!(handler.route_event(&InputEvent::PointerUp { location: at(100.0, 100.0) }, &view), None);
    }

    #[test]
    fn drag_inside_canvas_maps_to_canvas_coordinates() {
        let mut handler = InputHandler::new();
        let view = view();

        let down = handler.route_event(&InputEvent::PointerDown { location: at(150.0, 100.0) }, &view);
        assert_eq!(down, Some(Command::PointerDown(Pos2::new(50.0, 50.0))));

        // dragging past the edge still extends the stroke
        let moved = handler.route_event(&InputEvent::PointerMove { location: at(260.0, 100.0) }, &view);
        assert_eq!(moved, Some(Command::PointerMove(Pos2::new(105.0, 50.0))));

        assert_eq!(handler.route_event(&InputEvent::PointerLeave, &view), Some(Command::PointerUp));
        assert_eq!(handler.route_event(&InputEvent::PointerUp { location: at(0.0, 0.0) }, &view), None);
    }
}
