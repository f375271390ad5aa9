//! Settings screen: prediction endpoint and export folder.

use eframe::egui::{self, RichText, Ui};

use super::{EguiApp, style};

impl EguiApp {
    pub(super) fn render_settings(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading("Settings");
        ui.add_space(10.0);

        ui.label(RichText::new("Prediction endpoint").color(palette.text_primary));
        ui.add(
            egui::TextEdit::singleline(&mut self.controller.ui.settings.endpoint_draft)
                .hint_text("http://127.0.0.1:5000/predict")
                .desired_width(420.0),
        );
        if let Some(error) = self.controller.ui.settings.save_error.clone() {
            ui.label(
                RichText::new(error)
                    .color(style::status_badge_color(style::StatusTone::Error)),
            );
        }
        ui.add_space(6.0);
        if ui.button("Save").clicked() {
            self.controller.save_settings();
        }

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(8.0);

        ui.label(RichText::new("Report export folder").color(palette.text_primary));
        let export_root = self.controller.settings().export_root.clone();
        match export_root {
            Some(root) => {
                ui.label(RichText::new(root.display().to_string()).color(palette.text_muted));
            }
            None => {
                ui.label(
                    RichText::new("Not set; each export asks where to save")
                        .color(palette.text_muted),
                );
            }
        }
        ui.horizontal(|ui| {
            if ui.button("Choose folder…").clicked() {
                self.controller.choose_export_root();
            }
            if ui.button("Clear").clicked() {
                self.controller.clear_export_root();
            }
        });
    }
}
