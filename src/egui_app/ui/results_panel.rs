//! Per-model result rendering, including decoded explanation images.

use base64::Engine as _;
use eframe::egui::{self, RichText, TextureOptions, Ui};

use super::{EguiApp, style};

impl EguiApp {
    pub(super) fn render_results(&mut self, ui: &mut Ui) {
        let palette = style::palette();
        let form = &self.controller.ui.form;

        if let Some(error) = form.last_error.as_ref() {
            ui.label(
                RichText::new(error)
                    .color(style::status_badge_color(style::StatusTone::Error)),
            );
            ui.add_space(8.0);
        }
        if form.results.is_empty() {
            if form.last_error.is_none() && !form.submitting {
                ui.label(RichText::new("No results yet").color(palette.text_muted));
            }
            return;
        }

        ui.heading("Predictions");
        ui.add_space(6.0);
        let results = form.results.clone();
        for (model, result) in &results {
            egui::Frame::group(ui.style())
                .fill(palette.bg_secondary)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(model.display_name())
                            .strong()
                            .color(palette.accent),
                    );
                    ui.label(
                        RichText::new(&result.prediction)
                            .color(style::prediction_color(&result.prediction)),
                    );
                    ui.label(
                        RichText::new(format!(
                            "Confidence: {:.1}%",
                            result.confidence * 100.0
                        ))
                        .color(palette.text_primary),
                    );
                    if let Some(accuracy) = result.accuracy {
                        ui.label(
                            RichText::new(format!("Model accuracy: {:.1}%", accuracy * 100.0))
                                .color(palette.text_muted),
                        );
                    }
                    if let Some(texture) = self.explanation_textures.get(model) {
                        ui.add_space(4.0);
                        ui.image((texture.id(), texture.size_vec2()));
                    }
                    if let Some(text) = result
                        .text_explanation
                        .as_deref()
                        .filter(|text| !text.trim().is_empty())
                    {
                        ui.add_space(4.0);
                        ui.label(RichText::new(text).color(palette.text_primary));
                    }
                });
            ui.add_space(8.0);
        }
    }

    /// Rebuild uploaded textures when the result set was replaced.
    pub(super) fn ensure_explanation_textures(&mut self, ctx: &egui::Context) {
        let revision = self.controller.ui.form.results_revision;
        if self.textures_revision == revision {
            return;
        }
        self.explanation_textures.clear();
        for (model, result) in &self.controller.ui.form.results {
            let Some(encoded) = result.lime_explanation_image.as_deref() else {
                continue;
            };
            let Some(image) = decode_explanation_image(encoded) else {
                if !encoded.trim().is_empty() {
                    tracing::warn!(
                        model = model.wire_name(),
                        "discarding undecodable explanation image"
                    );
                }
                continue;
            };
            let texture = ctx.load_texture(
                format!("explanation_{}", model.wire_name()),
                image,
                TextureOptions::LINEAR,
            );
            self.explanation_textures.insert(*model, texture);
        }
        self.textures_revision = revision;
    }
}

/// Decode a base64 PNG into an egui image; `None` when the payload is empty
/// or not a decodable image.
fn decode_explanation_image(encoded: &str) -> Option<egui::ColorImage> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return None;
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(trimmed)
        .ok()?;
    let image = image::load_from_memory(&bytes).ok()?.to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    Some(egui::ColorImage::from_rgba_unmultiplied(
        size,
        image.as_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encoded_png() -> String {
        let image = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    #[test]
    fn decodes_a_valid_base64_png() {
        let decoded = decode_explanation_image(&encoded_png()).expect("image");
        assert_eq!(decoded.size, [2, 3]);
    }

    #[test]
    fn rejects_empty_and_garbage_payloads() {
        assert!(decode_explanation_image("").is_none());
        assert!(decode_explanation_image("   ").is_none());
        assert!(decode_explanation_image("!!!not-base64!!!").is_none());
        let not_png = base64::engine::general_purpose::STANDARD.encode(b"plain text");
        assert!(decode_explanation_image(&not_png).is_none());
    }
}
