use egui::load::SizedTexture;

use crate::ColoringApp;

const TILE: f32 = 160.0;

pub fn catalog_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Pick a page to color");

        let mut chosen_category: Option<Option<String>> = None;
        ui.horizontal_wrapped(|ui| {
            let current = app.catalog.category();
            if ui.selectable_label(current.is_none(), "All").clicked() {
                chosen_category = Some(None);
            }
            for category in app.catalog.categories() {
                if ui
                    .selectable_label(current == Some(category.as_str()), category)
                    .clicked()
                {
                    chosen_category = Some(Some(category.clone()));
                }
            }
            if app.loading.catalog {
                ui.spinner();
            }
        });
        ui.separator();

        let mut opened = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for page in app.catalog.pages() {
                    ui.vertical(|ui| {
                        ui.set_width(TILE);
                        let clicked = match app.renderer.page_thumbnail(ctx, page) {
                            Some(texture) => ui
                                .add(egui::ImageButton::new(SizedTexture::new(
                                    texture,
                                    egui::vec2(TILE, TILE),
                                )))
                                .clicked(),
                            None => ui
                                .add_sized([TILE, TILE], egui::Button::new(&page.name))
                                .clicked(),
                        };
                        ui.label(&page.name);
                        if clicked {
                            opened = Some(page.id.clone());
                        }
                    });
                }
            });

            if app.catalog.pages().is_empty() && !app.loading.catalog {
                ui.label("No pages available.");
            }
        });

        if let Some(category) = chosen_category {
            app.load_catalog(category);
        }
        if let Some(id) = opened {
            app.open_page(id);
        }
    });
}
