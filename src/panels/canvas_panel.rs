use crate::ColoringApp;
use crate::geometry::CanvasView;

pub fn canvas_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    // dialogs own the pointer while they are open
    let accept_input = !app.modal_open();

    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(editor) = app.editor.as_mut() else {
            ui.centered_and_justified(|ui| {
                if app.loading.page {
                    ui.spinner();
                } else {
                    ui.label("No page open.");
                }
            });
            return;
        };

        let available = ui.available_rect_before_wrap().shrink(8.0);
        let view = CanvasView::fit(editor.canvas(), available);
        ui.allocate_rect(view.screen_rect(), egui::Sense::hover());

        if accept_input {
            for command in app.input.commands(ctx, &view) {
                editor.apply(command);
            }
        }

        app.renderer.render_canvas(ctx, ui.painter(), view, editor);
    });
}
