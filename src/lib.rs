//! Library exports for the binary and integration tests.
/// Per-user application directories.
pub mod app_dirs;
/// Persisted settings.
pub mod config;
/// Shared egui UI modules.
pub mod egui_app;
pub(crate) mod http_client;
/// Log file setup.
pub mod logging;
/// Client for the remote grading service.
pub mod prediction;
