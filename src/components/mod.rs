pub mod tool_button;

pub use tool_button::{BrushButton, SwatchButton};
