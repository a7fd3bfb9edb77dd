use super::jobs::PredictionJob;
use super::preview::build_preview;
use super::*;
use crate::prediction::ImageUpload;
use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// Extensions offered by the file dialog.
pub(crate) const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "gif", "webp", "tif", "tiff",
];

impl EguiController {
    /// Whether the file input and reset control accept events.
    pub fn selection_enabled(&self) -> bool {
        !self.is_loading()
    }

    /// Replace the current selection and return to the ready state.
    ///
    /// Ignored while a request is in flight.
    pub fn select_file(&mut self, file: SelectedFile) {
        if self.is_loading() {
            tracing::debug!(file = %file.name(), "Ignoring selection while predicting");
            return;
        }
        let selection_id = self.next_selection_id;
        self.next_selection_id = self.next_selection_id.wrapping_add(1);
        let preview = build_preview(
            &file.upload.bytes,
            self.ui.upload.input_generation,
            selection_id,
        );
        tracing::info!(file = %file.name(), bytes = file.len(), "Image selected");
        let status = if preview.image.is_some() {
            format!("Selected {}", file.name())
        } else {
            format!("Selected {} (no preview available)", file.name())
        };
        self.set_status(status, StatusTone::Info);
        self.ui.upload.phase = UploadPhase::Ready(Selection { file, preview });
    }

    /// Read an image from disk and select it.
    pub fn select_file_from_path(&mut self, path: PathBuf) -> Result<(), String> {
        if self.is_loading() {
            return Ok(());
        }
        let file = read_selected_file(&path)
            .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
        self.select_file(file);
        Ok(())
    }

    /// Pick an image via the native file dialog.
    pub fn select_file_via_dialog(&mut self) {
        if self.is_loading() {
            return;
        }
        let Some(path) = FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        if let Err(error) = self.select_file_from_path(path) {
            tracing::warn!("{error}");
            self.set_status(error, StatusTone::Error);
        }
    }

    /// Select a file dropped onto the window, preferring in-memory bytes.
    pub fn select_dropped_file(
        &mut self,
        name: String,
        path: Option<PathBuf>,
        bytes: Option<Arc<[u8]>>,
    ) {
        match (bytes, path) {
            (Some(bytes), path) => {
                let file_name = display_name(&name, path.as_deref());
                self.select_file(SelectedFile {
                    upload: ImageUpload { file_name, bytes },
                    path,
                });
            }
            (None, Some(path)) => {
                if let Err(error) = self.select_file_from_path(path) {
                    tracing::warn!("{error}");
                    self.set_status(error, StatusTone::Error);
                }
            }
            (None, None) => {
                self.set_status("Dropped item has no readable file", StatusTone::Warning);
            }
        }
    }

    /// Send the selected image to the prediction service.
    ///
    /// Without a selection this only records the validation error. While a
    /// request is in flight, and from the result screen, it does nothing.
    pub fn submit(&mut self) {
        if self.runtime.jobs.prediction_in_progress() {
            tracing::debug!("Ignoring submit while a prediction is running");
            return;
        }
        let phase = std::mem::take(&mut self.ui.upload.phase);
        let (selection, previous_error) = match phase {
            UploadPhase::Ready(selection) => (selection, None),
            UploadPhase::Failed {
                selection: Some(selection),
                message,
            } => (selection, Some(message)),
            UploadPhase::Idle | UploadPhase::Failed { selection: None, .. } => {
                tracing::info!("Submit without an image");
                self.set_status(VALIDATION_MESSAGE, StatusTone::Warning);
                self.ui.upload.phase = UploadPhase::Failed {
                    selection: None,
                    message: VALIDATION_MESSAGE.to_string(),
                };
                return;
            }
            other @ (UploadPhase::Submitting { .. } | UploadPhase::Result { .. }) => {
                tracing::debug!(stage = ?other.stage(), "Ignoring submit");
                self.ui.upload.phase = other;
                return;
            }
        };

        let request_id = self.runtime.jobs.next_request_id();
        let started = self.runtime.jobs.begin_prediction(PredictionJob {
            request_id,
            upload: selection.file.upload.clone(),
            service: Arc::clone(&self.service),
        });
        if !started {
            self.ui.upload.phase = match previous_error {
                Some(message) => UploadPhase::Failed {
                    selection: Some(selection),
                    message,
                },
                None => UploadPhase::Ready(selection),
            };
            return;
        }
        tracing::info!(file = %selection.file.name(), request_id, "Submitting image for prediction");
        self.set_status(
            format!("Predicting {}...", selection.file.name()),
            StatusTone::Busy,
        );
        self.ui.upload.phase = UploadPhase::Submitting {
            selection,
            request_id,
        };
    }

    /// Clear selection, preview, prediction and error, and renew the file input.
    ///
    /// Ignored while a request is in flight.
    pub fn reset(&mut self) {
        if self.is_loading() {
            tracing::debug!("Ignoring reset while predicting");
            return;
        }
        self.ui.upload.phase = UploadPhase::Idle;
        self.ui.upload.input_generation = self.ui.upload.input_generation.wrapping_add(1);
        self.ui.status = StatusBarState::idle();
    }
}

fn read_selected_file(path: &Path) -> std::io::Result<SelectedFile> {
    let bytes = std::fs::read(path)?;
    Ok(SelectedFile {
        upload: ImageUpload {
            file_name: display_name("", Some(path)),
            bytes: Arc::from(bytes),
        },
        path: Some(path.to_path_buf()),
    })
}

fn display_name(name: &str, path: Option<&Path>) -> String {
    if !name.trim().is_empty() {
        return name.to_string();
    }
    path.and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string())
}
