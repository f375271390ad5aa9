//! The diagnosis form: measurement inputs, model choices, and actions.

use eframe::egui::{self, RichText, Ui};

use super::{EguiApp, style};
use crate::prediction::{FieldKey, ModelId};

impl EguiApp {
    pub(super) fn render_diagnosis(&mut self, ui: &mut Ui) {
        egui::ScrollArea::vertical()
            .id_salt("diagnosis_scroll")
            .show(ui, |ui| {
                self.render_form(ui);
                ui.add_space(12.0);
                ui.separator();
                ui.add_space(8.0);
                self.render_results(ui);
            });
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading("Enter your medical data");
        ui.add_space(8.0);

        let submitting = self.controller.ui.form.submitting;
        egui::Grid::new("measurement_grid")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for key in FieldKey::ALL {
                    ui.label(RichText::new(key.label()).color(palette.text_primary));
                    ui.add_enabled(
                        !submitting,
                        egui::TextEdit::singleline(self.controller.ui.form.fields.get_mut(key))
                            .hint_text("numeric")
                            .desired_width(180.0),
                    );
                    ui.end_row();
                }
            });

        let field_errors = self.controller.ui.form.field_errors.clone();
        if !field_errors.is_empty() {
            ui.add_space(6.0);
            for error in &field_errors {
                ui.label(
                    RichText::new(error.message())
                        .color(style::status_badge_color(style::StatusTone::Warning)),
                );
            }
        }

        ui.add_space(10.0);
        ui.label(RichText::new("Models").color(palette.text_primary));
        ui.horizontal(|ui| {
            for model in ModelId::ALL {
                let mut checked = self.controller.ui.form.selection.contains(model);
                if ui.checkbox(&mut checked, model.display_name()).changed() {
                    self.controller.toggle_model(model);
                }
            }
        });
        if self.controller.ui.form.selection.is_empty() {
            ui.label(
                RichText::new("No selection: all models are queried")
                    .color(palette.text_muted),
            );
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!submitting, egui::Button::new("Submit"))
                .clicked()
            {
                self.controller.submit();
            }
            ui.add_space(8.0);
            let has_results = !self.controller.ui.form.results.is_empty();
            if ui
                .add_enabled(has_results, egui::Button::new("Export report"))
                .clicked()
            {
                self.controller.export_results();
            }
            if self.controller.ui.form.last_report.is_some()
                && ui.button("Open last report").clicked()
            {
                self.controller.open_last_report();
            }
            if submitting {
                ui.add_space(8.0);
                ui.label(RichText::new("Submitting…").color(palette.text_muted));
            }
        });
    }
}
