//! Library exports for reuse in the binary and tests.
/// Static health-advice content.
pub mod advice;
/// Application directory helpers.
pub mod app_dirs;
/// Persisted application settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
/// Logging setup.
pub mod logging;
/// The prediction request/response workflow.
pub mod prediction;

mod http_client;
