use std::sync::Arc;

use coloring_book::api::{Page, StickerTemplate};
use coloring_book::geometry::CanvasSize;
use coloring_book::palette::{Brush, PALETTE};
use coloring_book::state::EditorSettings;
use coloring_book::{Command, EditorState, Snapshot};
use egui::Pos2;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn canvas() -> CanvasSize {
    CanvasSize {
        width: 200,
        height: 100,
    }
}

fn editor() -> EditorState {
    // an outline along the left edge only, leaving the rest of the paper blank
    let page = Page {
        id: "frame".to_owned(),
        name: "Frame".to_owned(),
        category: None,
        svg: r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100" viewBox="0 0 200 100">
  <rect x="0" y="0" width="4" height="100" fill="black"/>
</svg>"#
            .to_owned(),
        thumbnail_url: None,
    };
    let settings = EditorSettings {
        canvas: canvas(),
        sticker_size: 40.0,
        stroke_tolerance: 0.0,
    };
    EditorState::new(
        Arc::new(page),
        Brush {
            color: PALETTE[0].color,
            width: 20.0,
        },
        settings,
    )
}

fn blue_square() -> Arc<StickerTemplate> {
    Arc::new(StickerTemplate {
        id: "square".to_owned(),
        name: "Square".to_owned(),
        svg: r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">
  <rect width="10" height="10" fill="blue"/>
</svg>"#
            .to_owned(),
    })
}

fn red() -> [u8; 4] {
    let [r, g, b, a] = PALETTE[0].color.to_srgba_unmultiplied();
    [r, g, b, a]
}

#[test]
fn layers_stack_page_then_strokes_then_stickers() {
    let editor = editor()
        .handle(Command::PointerDown(Pos2::new(20.0, 50.0)))
        .handle(Command::PointerMove(Pos2::new(180.0, 50.0)))
        .handle(Command::PointerUp)
        .handle(Command::PlaceSticker {
            template: blue_square(),
            position: None,
        });

    let snapshot = Snapshot::render(editor.document(), editor.canvas()).unwrap();

    assert_eq!((snapshot.width(), snapshot.height()), (200, 100));
    // untouched paper
    assert_eq!(snapshot.pixel(100, 10), Some(WHITE));
    // page outline
    assert_eq!(snapshot.pixel(1, 10), Some([0, 0, 0, 255]));
    // stroke over paper
    assert_eq!(snapshot.pixel(40, 50), Some(red()));
    // sticker over stroke, centered on the canvas
    assert_eq!(snapshot.pixel(100, 50), Some(BLUE));
}

#[test]
fn strokes_paint_in_order() {
    let editor = editor()
        .handle(Command::PointerDown(Pos2::new(100.0, 10.0)))
        .handle(Command::PointerMove(Pos2::new(100.0, 90.0)))
        .handle(Command::PointerUp)
        .handle(Command::SelectBrush(Brush {
            color: egui::Color32::from_rgb(0, 255, 0),
            width: 20.0,
        }))
        .handle(Command::PointerDown(Pos2::new(60.0, 50.0)))
        .handle(Command::PointerMove(Pos2::new(140.0, 50.0)))
        .handle(Command::PointerUp);

    let snapshot = Snapshot::render(editor.document(), editor.canvas()).unwrap();

    assert_eq!(snapshot.pixel(100, 50), Some([0, 255, 0, 255]));
    assert_eq!(snapshot.pixel(100, 20), Some(red()));
}

#[test]
fn a_tap_paints_a_round_dot() {
    let editor = editor()
        .handle(Command::PointerDown(Pos2::new(100.0, 50.0)))
        .handle(Command::PointerUp);

    let snapshot = Snapshot::render(editor.document(), editor.canvas()).unwrap();

    assert_eq!(snapshot.pixel(100, 50), Some(red()));
    // inside the bounding square but outside the circle
    assert_eq!(snapshot.pixel(108, 58), Some(WHITE));
}

#[test]
fn a_broken_page_outline_fails_the_snapshot() {
    let page = Page {
        id: "broken".to_owned(),
        name: "Broken".to_owned(),
        category: None,
        svg: "<svg".to_owned(),
        thumbnail_url: None,
    };
    let editor = EditorState::new(Arc::new(page), Brush::default(), EditorSettings::default());

    assert!(Snapshot::render(editor.document(), editor.canvas()).is_err());
}
