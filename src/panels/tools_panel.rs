use egui::load::SizedTexture;

use crate::ColoringApp;
use crate::command::Command;
use crate::components::{BrushButton, SwatchButton};
use crate::palette::{BRUSH_WIDTHS, PALETTE};

const STICKER_ICON: u32 = 48;

pub fn tools_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            let Some(editor) = app.editor.as_mut() else {
                return;
            };
            let mut commands = Vec::new();

            ui.heading(&editor.page().name);
            ui.separator();

            ui.label("Colors");
            let mut selection = app.preferences.palette;
            ui.horizontal_wrapped(|ui| {
                for (index, swatch) in PALETTE.iter().enumerate() {
                    let selected = index == selection.color_index;
                    if SwatchButton::new(swatch.color, swatch.name, selected).show(ui).clicked() {
                        selection.color_index = index;
                    }
                }
            });

            ui.label("Brush");
            ui.horizontal(|ui| {
                for (index, width) in BRUSH_WIDTHS.iter().enumerate() {
                    let selected = index == selection.brush_index;
                    if BrushButton::new(*width, editor.brush().color, selected).show(ui).clicked() {
                        selection.brush_index = index;
                    }
                }
            });

            if selection != app.preferences.palette {
                app.preferences.palette = selection;
                commands.push(Command::SelectBrush(selection.brush()));
            }

            ui.separator();
            ui.label("Stickers");
            ui.horizontal_wrapped(|ui| {
                for template in app.catalog.stickers() {
                    let icon = app.renderer.sticker_icon(ctx, &template.id, &template.svg, STICKER_ICON);
                    let response = match icon {
                        Some(texture) => ui.add(egui::ImageButton::new(SizedTexture::new(
                            texture,
                            egui::vec2(STICKER_ICON as f32, STICKER_ICON as f32),
                        ))),
                        None => ui.button(&template.name),
                    };
                    if response.on_hover_text(&template.name).clicked() {
                        commands.push(Command::PlaceSticker {
                            template: template.clone(),
                            position: None,
                        });
                    }
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                let has_content = !editor.document().is_empty();
                if ui.add_enabled(has_content, egui::Button::new("Undo")).clicked() {
                    commands.push(Command::Undo);
                }
                if ui.add_enabled(has_content, egui::Button::new("Clear")).clicked() {
                    app.show_clear_confirm = true;
                }
            });

            ui.separator();
            ui.label("Title");
            ui.add(
                egui::TextEdit::singleline(editor.title_mut())
                    .hint_text("Leave empty for an automatic title"),
            );

            let mut save_clicked = false;
            ui.horizontal(|ui| {
                let saving = app.loading.save.is_saving();
                if ui.add_enabled(!saving, egui::Button::new("💾 Save to gallery")).clicked() {
                    save_clicked = true;
                }
                if saving {
                    ui.spinner();
                }
            });

            for command in commands {
                editor.apply(command);
            }
            if save_clicked {
                app.save_to_gallery();
            }
        });
}
