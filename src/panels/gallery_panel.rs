use chrono::Local;
use egui::load::SizedTexture;

use crate::ColoringApp;
use crate::export;

const THUMBNAIL: f32 = 180.0;

enum GalleryAction {
    Share(String),
    Export(String),
    Delete(String),
}

pub fn gallery_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("My gallery");
            if app.loading.gallery {
                ui.spinner();
            } else if ui.button("⟳ Refresh").clicked() {
                app.load_gallery();
            }
        });
        ui.separator();

        if app.gallery.is_empty() && !app.loading.gallery {
            ui.label("Nothing saved yet. Color a page and save it to see it here.");
            return;
        }

        let mut action = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for artwork in app.gallery.items() {
                    ui.group(|ui| {
                        ui.set_width(THUMBNAIL);
                        ui.vertical(|ui| {
                            match app.renderer.thumbnail(ctx, artwork) {
                                Some(texture) => {
                                    ui.image(SizedTexture::new(texture, egui::vec2(THUMBNAIL, THUMBNAIL)));
                                }
                                None => {
                                    ui.label("(image unavailable)");
                                }
                            }
                            ui.strong(artwork.display_title());
                            ui.weak(
                                artwork
                                    .completed_at
                                    .with_timezone(&Local)
                                    .format("%Y-%m-%d %H:%M")
                                    .to_string(),
                            );

                            let deleting = app.loading.deleting.contains(&artwork.id);
                            ui.horizontal(|ui| {
                                if ui.button("Share").clicked() {
                                    action = Some(GalleryAction::Share(artwork.id.clone()));
                                }
                                if ui.button("Export").clicked() {
                                    action = Some(GalleryAction::Export(artwork.id.clone()));
                                }
                                if ui.add_enabled(!deleting, egui::Button::new("Delete")).clicked() {
                                    action = Some(GalleryAction::Delete(artwork.id.clone()));
                                }
                            });
                        });
                    });
                }
            });
        });

        match action {
            Some(GalleryAction::Share(id)) => {
                if let Some(artwork) = app.gallery.get(&id) {
                    ctx.copy_text(export::share_payload(artwork));
                    app.notify_info("Copied", "The picture was copied to the clipboard.");
                }
            }
            Some(GalleryAction::Export(id)) => app.export(&id),
            Some(GalleryAction::Delete(id)) => app.pending_delete = Some(id),
            None => {}
        }
    });
}
