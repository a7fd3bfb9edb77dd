//! Owns the upload view state and applies every transition to it.
//!
//! The renderer only reads `ui`; all mutation happens through the methods
//! here, on the UI thread. The one slow operation, the prediction request,
//! runs on a worker thread and reports back through [`jobs::ControllerJobs`],
//! drained by [`EguiController::tick`].

mod background_jobs;
mod config;
mod jobs;
mod preview;
mod upload;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use crate::egui_app::state::*;
use crate::egui_app::ui::style::{self, StatusTone};
use crate::prediction::PredictionService;

use jobs::ControllerJobs;

/// Maintains app state and bridges the prediction client to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    service: Arc<dyn PredictionService>,
    runtime: ControllerRuntime,
    next_selection_id: u64,
}

struct ControllerRuntime {
    jobs: ControllerJobs,
}

impl EguiController {
    /// Create a controller that sends predictions to `service`.
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            ui: UiState::default(),
            service,
            runtime: ControllerRuntime {
                jobs: ControllerJobs::new(),
            },
            next_selection_id: 1,
        }
    }

    /// Apply any finished background work. Call once per frame.
    pub fn tick(&mut self) {
        self.poll_background_jobs();
    }

    /// Current phase of the upload form.
    pub fn stage(&self) -> UploadStage {
        self.ui.upload.phase.stage()
    }

    /// True while a prediction request is in flight.
    pub fn is_loading(&self) -> bool {
        self.ui.upload.phase.is_loading()
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.text = text.into();
        self.ui.status.badge_label = style::status_badge_label(tone).into();
        self.ui.status.badge_color = style::status_badge_color(tone);
    }
}
