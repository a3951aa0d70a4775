use eframe::egui;

const BUTTON_SIZE: egui::Vec2 = egui::vec2(32.0, 32.0);
const SELECTED_RING: egui::Color32 = egui::Color32::from_rgb(33, 150, 243);

/// Round palette button showing one color.
pub struct SwatchButton {
    pub color: egui::Color32,
    pub name: &'static str,
    pub selected: bool,
}

impl SwatchButton {
    pub fn new(color: egui::Color32, name: &'static str, selected: bool) -> Self {
        Self {
            color,
            name,
            selected,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(BUTTON_SIZE, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let radius = if response.hovered() { 14.0 } else { 12.0 };
            ui.painter().circle_filled(rect.center(), radius, self.color);
            if self.selected {
                ui.painter()
                    .circle_stroke(rect.center(), 15.0, egui::Stroke::new(2.0, SELECTED_RING));
            }
        }

        response.on_hover_text(self.name)
    }
}

/// Square button previewing a brush width as a dot.
pub struct BrushButton {
    pub width: f32,
    pub color: egui::Color32,
    pub selected: bool,
}

impl BrushButton {
    pub fn new(width: f32, color: egui::Color32, selected: bool) -> Self {
        Self {
            width,
            color,
            selected,
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(BUTTON_SIZE, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(100, 181, 246) // Light blue when selected
            } else if response.hovered() {
                egui::Color32::from_gray(60)
            } else {
                egui::Color32::from_gray(40)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let dot = (self.width / 2.0).clamp(1.0, rect.width() / 2.0 - 3.0);
            ui.painter().circle_filled(rect.center(), dot, self.color);
        }

        response.on_hover_text(format!("{} px", self.width))
    }
}
