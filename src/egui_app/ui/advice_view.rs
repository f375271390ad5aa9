//! Advice screen: static guidance tiles with a modal detail view.

use eframe::egui::{self, Align2, RichText, Ui};

use super::{EguiApp, style};
use crate::advice;

const TILES_PER_ROW: usize = 3;

impl EguiApp {
    pub(super) fn render_advice(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        ui.heading("Advice");
        ui.label(
            RichText::new(
                "Helpful tips and resources for managing diabetes, preventing \
                 complications, and living a healthier life.",
            )
            .color(palette.text_muted),
        );
        ui.add_space(12.0);

        let sections = advice::sections();
        egui::ScrollArea::vertical()
            .id_salt("advice_scroll")
            .show(ui, |ui| {
                for (row_index, row) in sections.chunks(TILES_PER_ROW).enumerate() {
                    ui.horizontal(|ui| {
                        for (col_index, section) in row.iter().enumerate() {
                            let index = row_index * TILES_PER_ROW + col_index;
                            let tile = egui::Button::new(
                                RichText::new(section.title).color(palette.text_primary),
                            )
                            .min_size(egui::vec2(200.0, 64.0));
                            let response =
                                ui.add(tile).on_hover_text(section.summary);
                            if response.clicked() {
                                self.controller.ui.advice.open_section = Some(index);
                            }
                        }
                    });
                    ui.add_space(8.0);
                }
            });
    }

    /// Render the modal detail view for the opened advice section.
    pub(super) fn render_advice_modal(&mut self, ctx: &egui::Context) {
        let Some(index) = self.controller.ui.advice.open_section else {
            return;
        };
        let Some(section) = advice::sections().get(index) else {
            self.controller.ui.advice.open_section = None;
            return;
        };

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controller.ui.advice.open_section = None;
            return;
        }

        let palette = style::palette();
        let mut open = true;
        let mut close_clicked = false;
        egui::Window::new(section.title)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .collapsible(false)
            .resizable(false)
            .default_width(480.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(RichText::new(section.body).color(palette.text_primary));
                ui.add_space(12.0);
                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
            });
        if !open || close_clicked {
            self.controller.ui.advice.open_section = None;
        }
    }
}
