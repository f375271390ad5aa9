//! Shared state types for the egui UI.

use std::path::PathBuf;

use egui::Color32;

use crate::config::AppSettings;
use crate::egui_app::ui::style;
use crate::prediction::{FieldError, FormFields, ModelSelection, ResultSet};

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Which screen is active.
    pub screen: Screen,
    pub form: DiagnosisFormState,
    pub advice: AdviceUiState,
    pub settings: SettingsUiState,
    pub status: StatusBarState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            screen: Screen::Diagnosis,
            form: DiagnosisFormState::default(),
            advice: AdviceUiState::default(),
            settings: SettingsUiState::default(),
            status: StatusBarState::idle(),
        }
    }
}

/// Screens reachable from the top bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Diagnosis,
    Advice,
    Settings,
}

/// State for the diagnosis form and its result panel.
#[derive(Clone, Debug, Default)]
pub struct DiagnosisFormState {
    /// Raw text for each measurement input.
    pub fields: FormFields,
    /// Models the user has toggled on; empty means all.
    pub selection: ModelSelection,
    /// Validation problems from the last submit attempt.
    pub field_errors: Vec<FieldError>,
    /// True while the newest submission is outstanding.
    pub submitting: bool,
    /// Results of the last accepted response; empty until the first success.
    pub results: ResultSet,
    /// Bumped whenever `results` is replaced, so cached textures rebuild.
    pub results_revision: u64,
    /// Last request or server error, if any.
    pub last_error: Option<String>,
    /// Path of the most recently exported report.
    pub last_report: Option<PathBuf>,
}

/// State for the advice screen.
#[derive(Clone, Debug, Default)]
pub struct AdviceUiState {
    /// Index of the section open in the detail modal.
    pub open_section: Option<usize>,
}

/// Editable draft of the persisted settings.
#[derive(Clone, Debug, Default)]
pub struct SettingsUiState {
    /// Endpoint text being edited; applied on save after URL validation.
    pub endpoint_draft: String,
    /// Error from the last save attempt, if any.
    pub save_error: Option<String>,
}

impl SettingsUiState {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            endpoint_draft: settings.endpoint.clone(),
            save_error: None,
        }
    }
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Enter your measurements to get a prediction".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(style::StatusTone::Idle),
        }
    }
}
