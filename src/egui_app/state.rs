//! Shared state types for the egui UI.

mod status;
mod upload;

pub use status::*;
pub use upload::*;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub upload: UploadViewState,
    /// Heading shown above the form.
    pub title: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            upload: UploadViewState::default(),
            title: crate::config::UiSettings::default().title,
        }
    }
}
