//! egui renderer for the upload/predict view.

mod layout;
mod preview_image;
mod result_panel;
mod status_area;
pub mod style;
mod update;
mod upload_form;

use crate::egui_app::controller::EguiController;
use eframe::egui::{self, TextureHandle};

/// Minimum window size that still fits the card and the status bar.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(420.0, 520.0);

/// Default window size on first launch.
pub const DEFAULT_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(560.0, 720.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
    preview_tex: Option<(String, TextureHandle)>,
}

/// User intent collected while drawing, applied once the frame's borrows end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UiAction {
    PickFile,
    Submit,
    Reset,
}

impl EguiApp {
    /// Wrap a configured controller.
    pub fn new(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
            preview_tex: None,
        }
    }

    fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::PickFile => self.controller.select_file_via_dialog(),
            UiAction::Submit => self.controller.submit(),
            UiAction::Reset => self.controller.reset(),
        }
    }
}
