mod canvas_panel;
mod catalog_panel;
mod gallery_panel;
mod tools_panel;

pub use canvas_panel::canvas_panel;
pub use catalog_panel::catalog_panel;
pub use gallery_panel::gallery_panel;
pub use tools_panel::tools_panel;
