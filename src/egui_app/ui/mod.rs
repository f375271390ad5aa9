//! egui renderer for the application UI.

pub mod style;

mod advice_view;
mod form_panel;
mod results_panel;
mod settings_view;

use std::collections::HashMap;

use eframe::egui::{self, Frame, RichText, TextureHandle};

use crate::egui_app::controller::EguiController;
use crate::egui_app::state::Screen;
use crate::prediction::ModelId;

/// Smallest viewport the layout is designed for.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(760.0, 560.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    /// Uploaded explanation images, rebuilt when the result set is replaced.
    explanation_textures: HashMap<ModelId, TextureHandle>,
    textures_revision: u64,
}

impl EguiApp {
    /// Create the app, loading persisted configuration.
    pub fn new() -> Result<Self, String> {
        let mut controller = EguiController::new();
        controller
            .load_configuration()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        Ok(Self {
            controller,
            visuals_set: false,
            explanation_textures: HashMap::new(),
            textures_revision: 0,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::new().fill(palette.bg_secondary))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Diasense")
                            .strong()
                            .color(palette.accent),
                    );
                    ui.add_space(12.0);
                    ui.separator();
                    for (screen, label) in [
                        (Screen::Diagnosis, "Diagnosis"),
                        (Screen::Advice, "Advice"),
                        (Screen::Settings, "Settings"),
                    ] {
                        let selected = self.controller.ui.screen == screen;
                        if ui.selectable_label(selected, label).clicked() {
                            self.controller.show_screen(screen);
                        }
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(palette.bg_primary))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(palette.text_primary));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                });
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        if self.controller.is_submitting() {
            // Keep draining worker messages while the app is otherwise idle.
            ctx.request_repaint_after(std::time::Duration::from_millis(120));
        }

        self.render_top_bar(ctx);
        self.render_status(ctx);
        self.ensure_explanation_textures(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.controller.ui.screen {
            Screen::Diagnosis => self.render_diagnosis(ui),
            Screen::Advice => self.render_advice(ui),
            Screen::Settings => self.render_settings(ui),
        });

        self.render_advice_modal(ctx);
    }
}
