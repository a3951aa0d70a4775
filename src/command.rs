use egui::Pos2;

use crate::palette::Brush;
use crate::sticker::StickerRef;

/// Every way the editor state can change.
///
/// Pointer positions are canvas-local.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp,
    SelectBrush(Brush),
    PlaceSticker {
        template: StickerRef,
        /// Top-left corner; `None` centers the sticker on the canvas.
        position: Option<Pos2>,
    },
    Undo,
    /// Destructive; callers confirm with the user first.
    Clear,
    SetTitle(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::PointerDown(_) => "PointerDown",
            Command::PointerMove(_) => "PointerMove",
            Command::PointerUp => "PointerUp",
            Command::SelectBrush(_) => "SelectBrush",
            Command::PlaceSticker { .. } => "PlaceSticker",
            Command::Undo => "Undo",
            Command::Clear => "Clear",
            Command::SetTitle(_) => "SetTitle",
        }
    }

    /// True for commands that change the document rather than transient editor state.
    pub fn edits_document(&self) -> bool {
        matches!(
            self,
            Command::PointerUp | Command::PlaceSticker { .. } | Command::Undo | Command::Clear
        )
    }
}
