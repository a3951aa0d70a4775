mod editor_state;
mod gesture;

pub use editor_state::{EditorSettings, EditorState};
pub use gesture::{GestureState, Transition};
