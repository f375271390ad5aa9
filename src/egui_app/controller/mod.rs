//! Maintains app state and bridges the prediction core to the egui UI.

mod background_jobs;
mod jobs;

use std::path::PathBuf;

use rfd::FileDialog;
use time::OffsetDateTime;

use crate::config::{self, AppSettings};
use crate::egui_app::state::{Screen, SettingsUiState, UiState};
use crate::egui_app::ui::style::{self, StatusTone};
use crate::prediction::report;
use crate::prediction::{FieldKey, ModelId};

use jobs::ControllerJobs;

/// Controller owning all UI state mutation.
pub struct EguiController {
    pub ui: UiState,
    settings: AppSettings,
    jobs: ControllerJobs,
}

impl EguiController {
    pub fn new() -> Self {
        Self {
            ui: UiState::default(),
            settings: AppSettings::default(),
            jobs: ControllerJobs::new(),
        }
    }

    /// Load persisted settings and populate initial UI state.
    pub fn load_configuration(&mut self) -> Result<(), config::ConfigError> {
        self.settings = config::load_or_default()?;
        self.ui.settings = SettingsUiState::from_settings(&self.settings);
        Ok(())
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Switch the active screen.
    pub fn show_screen(&mut self, screen: Screen) {
        if screen == Screen::Settings && self.ui.screen != Screen::Settings {
            self.ui.settings = SettingsUiState::from_settings(&self.settings);
        }
        self.ui.screen = screen;
    }

    /// Replace the text of one measurement field. No validation happens here;
    /// problems are reported on the next submit.
    pub fn update_field(&mut self, key: FieldKey, text: impl Into<String>) {
        self.ui.form.fields.set(key, text);
    }

    /// Toggle one model in the selection. Has no effect on a request that is
    /// already in flight.
    pub fn toggle_model(&mut self, model: ModelId) {
        self.ui.form.selection.toggle(model);
    }

    /// Validate the form and, if it is complete, dispatch a prediction
    /// request to a worker thread.
    pub fn submit(&mut self) {
        match self.ui.form.fields.validate() {
            Err(errors) => {
                self.ui.form.field_errors = errors;
                self.set_status(
                    "Fix the highlighted fields before submitting",
                    StatusTone::Warning,
                );
            }
            Ok(payload) => {
                self.ui.form.field_errors.clear();
                self.ui.form.submitting = true;
                self.ui.form.last_error = None;
                let endpoint = self.settings.endpoint.clone();
                let selection = self.ui.form.selection.clone();
                let generation = self.jobs.begin_predict(endpoint, payload, selection);
                tracing::info!(generation, "dispatched prediction request");
                self.set_status("Requesting prediction…", StatusTone::Busy);
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.jobs.predict_in_flight()
    }

    /// Export the current inputs and results as a self-contained HTML report.
    ///
    /// A no-op with a notice when there are no results yet. The target path
    /// comes from the configured export root, or a save dialog otherwise.
    pub fn export_results(&mut self) {
        if self.ui.form.results.is_empty() {
            self.set_status("No results to export yet", StatusTone::Warning);
            return;
        }
        let html = report::render_report(&self.ui.form.fields, &self.ui.form.results);
        let file_name = report::suggested_file_name(now_local_or_utc());
        let Some(path) = self.resolve_export_path(&file_name) else {
            return;
        };
        match std::fs::write(&path, html) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "exported prediction report");
                self.ui.form.last_report = Some(path.clone());
                self.set_status(
                    format!("Report exported to {}", path.display()),
                    StatusTone::Info,
                );
            }
            Err(err) => {
                self.set_status(
                    format!("Failed to write report {}: {err}", path.display()),
                    StatusTone::Error,
                );
            }
        }
    }

    /// Open the most recently exported report with the platform viewer.
    pub fn open_last_report(&mut self) {
        let Some(path) = self.ui.form.last_report.clone() else {
            return;
        };
        if let Err(err) = open::that(&path) {
            self.set_status(
                format!("Could not open {}: {err}", path.display()),
                StatusTone::Warning,
            );
        }
    }

    fn resolve_export_path(&mut self, file_name: &str) -> Option<PathBuf> {
        if let Some(root) = self.settings.export_root.as_ref() {
            return Some(root.join(file_name));
        }
        let picked = FileDialog::new()
            .set_file_name(file_name)
            .add_filter("HTML report", &["html"])
            .save_file();
        if picked.is_none() {
            self.set_status("Export canceled", StatusTone::Idle);
        }
        picked
    }

    /// Validate and persist the endpoint draft from the settings screen.
    pub fn save_settings(&mut self) {
        let draft = self.ui.settings.endpoint_draft.trim().to_string();
        match url::Url::parse(&draft) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                self.ui.settings.save_error = Some(format!(
                    "Endpoint must use http or https, not {}",
                    parsed.scheme()
                ));
                return;
            }
            Err(err) => {
                self.ui.settings.save_error = Some(format!("Invalid endpoint URL: {err}"));
                return;
            }
        }
        self.settings.endpoint = draft;
        self.ui.settings.save_error = None;
        self.persist_settings("Settings saved");
    }

    /// Pick a folder that future exports are written to without a dialog.
    pub fn choose_export_root(&mut self) {
        let Some(path) = FileDialog::new().pick_folder() else {
            return;
        };
        self.settings.export_root = Some(path);
        self.persist_settings("Export folder saved");
    }

    pub fn clear_export_root(&mut self) {
        self.settings.export_root = None;
        self.persist_settings("Export folder cleared; exports will ask where to save");
    }

    fn persist_settings(&mut self, success_message: &str) {
        match config::save(&self.settings) {
            Ok(()) => self.set_status(success_message, StatusTone::Info),
            Err(err) => {
                self.set_status(format!("Failed to save settings: {err}"), StatusTone::Error)
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = style::status_badge_label(tone).to_string();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }
}

impl Default for EguiController {
    fn default() -> Self {
        Self::new()
    }
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{ModelResult, ResultSet};
    use tempfile::tempdir;

    fn controller_with_results() -> EguiController {
        let mut controller = EguiController::new();
        let mut results = ResultSet::new();
        results.insert(
            ModelId::RandomForest,
            ModelResult {
                prediction: "Not Diabetic".into(),
                confidence: 0.74,
                accuracy: Some(0.81),
                lime_explanation_image: None,
                text_explanation: None,
            },
        );
        controller.ui.form.results = results;
        controller
    }

    #[test]
    fn update_field_replaces_text_without_validation() {
        let mut controller = EguiController::new();
        controller.update_field(FieldKey::Glucose, "not a number");
        assert_eq!(controller.ui.form.fields.get(FieldKey::Glucose), "not a number");
        assert!(controller.ui.form.field_errors.is_empty());
    }

    #[test]
    fn toggle_model_twice_restores_selection() {
        let mut controller = EguiController::new();
        controller.toggle_model(ModelId::GradientBoosting);
        assert!(controller.ui.form.selection.contains(ModelId::GradientBoosting));
        controller.toggle_model(ModelId::GradientBoosting);
        assert!(controller.ui.form.selection.is_empty());
    }

    #[test]
    fn submit_with_invalid_fields_blocks_and_surfaces_errors() {
        let mut controller = EguiController::new();
        controller.submit();
        assert_eq!(controller.ui.form.field_errors.len(), 8);
        assert!(!controller.ui.form.submitting);
        assert!(!controller.is_submitting());
    }

    #[test]
    fn export_with_empty_results_is_a_guarded_no_op() {
        let mut controller = EguiController::new();
        controller.export_results();
        assert_eq!(controller.ui.form.last_report, None);
        assert!(controller.ui.status.text.contains("No results"));
    }

    #[test]
    fn export_writes_report_under_the_configured_root() {
        let dir = tempdir().unwrap();
        let mut controller = controller_with_results();
        controller.settings.export_root = Some(dir.path().to_path_buf());
        controller.ui.form.fields.set(FieldKey::Glucose, "148");

        controller.export_results();

        let path = controller.ui.form.last_report.clone().expect("report path");
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Random Forest"));
        assert!(html.contains("Glucose"));
        assert!(html.contains("148"));
    }

    #[test]
    fn save_settings_rejects_malformed_and_non_http_urls() {
        let mut controller = EguiController::new();
        controller.ui.settings.endpoint_draft = "not a url".into();
        controller.save_settings();
        assert!(controller.ui.settings.save_error.is_some());
        assert_eq!(controller.settings.endpoint, config::DEFAULT_ENDPOINT);

        controller.ui.settings.endpoint_draft = "ftp://example.test/predict".into();
        controller.save_settings();
        assert!(controller.ui.settings.save_error.is_some());
        assert_eq!(controller.settings.endpoint, config::DEFAULT_ENDPOINT);
    }

    #[test]
    fn save_settings_accepts_http_and_persists() {
        let dir = tempdir().unwrap();
        let _guard = crate::app_dirs::ConfigBaseGuard::set(dir.path().to_path_buf());
        let mut controller = EguiController::new();
        controller.ui.settings.endpoint_draft = "http://10.1.2.3:5000/predict".into();
        controller.save_settings();
        assert_eq!(controller.ui.settings.save_error, None);
        assert_eq!(controller.settings.endpoint, "http://10.1.2.3:5000/predict");

        let loaded = config::load_or_default().unwrap();
        assert_eq!(loaded.endpoint, "http://10.1.2.3:5000/predict");
    }
}
