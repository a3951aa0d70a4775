#![warn(clippy::all, rust_2018_idioms)]

pub mod api;
pub mod app;
pub mod catalog;
pub mod command;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod gallery;
pub mod geometry;
pub mod input;
pub mod notice;
pub mod palette;
pub mod panels;
pub mod renderer;
pub mod requests;
pub mod save;
pub mod snapshot;
pub mod state;
pub mod sticker;
pub mod stroke;
pub mod texture_manager;

pub use app::ColoringApp;
pub use command::Command;
pub use config::AppConfig;
pub use document::Document;
pub use error::{AppError, AppResult};
pub use input::{InputEvent, InputLocation};
pub use palette::Brush;
pub use renderer::Renderer;
pub use snapshot::Snapshot;
pub use state::EditorState;
pub use sticker::StickerPlacement;
pub use stroke::Stroke;
