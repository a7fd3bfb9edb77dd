use std::path::PathBuf;

use egui::ColorImage;

use crate::prediction::{ImageUpload, PredictionResult};

/// Error shown when submitting without a chosen image.
pub const VALIDATION_MESSAGE: &str = "Please upload an image first.";

/// Image the user picked, owned by the view until reset or replaced.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub upload: ImageUpload,
    /// Where the bytes came from, when picked from disk.
    pub path: Option<PathBuf>,
}

impl SelectedFile {
    pub fn name(&self) -> &str {
        &self.upload.file_name
    }

    pub fn len(&self) -> usize {
        self.upload.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upload.bytes.is_empty()
    }
}

/// Locally decoded preview of the selected file.
///
/// `texture_key` is unique per selection so the renderer knows when to
/// upload a new texture. `image` is `None` when the bytes do not decode.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewReference {
    pub texture_key: String,
    pub image: Option<ColorImage>,
}

/// A selected file together with its preview; the two live and die together.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub file: SelectedFile,
    pub preview: PreviewReference,
}

/// Mutually exclusive phases of the upload form.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UploadPhase {
    /// Nothing selected.
    #[default]
    Idle,
    /// File chosen and waiting for submit.
    Ready(Selection),
    /// One request in flight for `request_id`.
    Submitting { selection: Selection, request_id: u64 },
    /// Prediction received; the selection is kept for the preview.
    Result {
        selection: Selection,
        prediction: PredictionResult,
    },
    /// Last attempt failed. `selection` is `None` for the no-file validation error.
    Failed {
        selection: Option<Selection>,
        message: String,
    },
}

/// Fieldless mirror of [`UploadPhase`] for comparisons and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStage {
    Idle,
    Ready,
    Submitting,
    Result,
    Failed,
}

impl UploadPhase {
    pub fn stage(&self) -> UploadStage {
        match self {
            Self::Idle => UploadStage::Idle,
            Self::Ready(_) => UploadStage::Ready,
            Self::Submitting { .. } => UploadStage::Submitting,
            Self::Result { .. } => UploadStage::Result,
            Self::Failed { .. } => UploadStage::Failed,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Self::Idle => None,
            Self::Ready(selection)
            | Self::Submitting { selection, .. }
            | Self::Result { selection, .. } => Some(selection),
            Self::Failed { selection, .. } => selection.as_ref(),
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selection().map(|selection| &selection.file)
    }

    pub fn preview(&self) -> Option<&PreviewReference> {
        self.selection().map(|selection| &selection.preview)
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        match self {
            Self::Result { prediction, .. } => Some(prediction),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// True strictly while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    pub fn pending_request(&self) -> Option<u64> {
        match self {
            Self::Submitting { request_id, .. } => Some(*request_id),
            _ => None,
        }
    }
}

/// State of the upload/predict view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadViewState {
    pub phase: UploadPhase,
    /// Identity of the file input; bumped on reset so the widget starts fresh.
    pub input_generation: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn selection() -> Selection {
        Selection {
            file: SelectedFile {
                upload: ImageUpload {
                    file_name: "knee.png".to_string(),
                    bytes: Arc::from(&[1u8, 2, 3][..]),
                },
                path: None,
            },
            preview: PreviewReference {
                texture_key: "preview-0-1".to_string(),
                image: None,
            },
        }
    }

    #[test]
    fn idle_has_nothing() {
        let phase = UploadPhase::default();
        assert_eq!(phase.stage(), UploadStage::Idle);
        assert!(phase.selected_file().is_none());
        assert!(phase.preview().is_none());
        assert!(phase.prediction().is_none());
        assert!(phase.error_message().is_none());
        assert!(!phase.is_loading());
    }

    #[test]
    fn loading_flag_tracks_submitting_only() {
        let submitting = UploadPhase::Submitting {
            selection: selection(),
            request_id: 4,
        };
        assert!(submitting.is_loading());
        assert_eq!(submitting.pending_request(), Some(4));
        assert!(!UploadPhase::Ready(selection()).is_loading());
    }

    #[test]
    fn validation_failure_has_error_but_no_preview() {
        let phase = UploadPhase::Failed {
            selection: None,
            message: VALIDATION_MESSAGE.to_string(),
        };
        assert_eq!(phase.error_message(), Some(VALIDATION_MESSAGE));
        assert!(phase.preview().is_none());
        assert!(phase.selected_file().is_none());
    }

    #[test]
    fn preview_is_present_exactly_when_a_file_is() {
        let phases = [
            UploadPhase::Idle,
            UploadPhase::Ready(selection()),
            UploadPhase::Failed {
                selection: Some(selection()),
                message: "boom".to_string(),
            },
        ];
        for phase in phases {
            assert_eq!(phase.preview().is_some(), phase.selected_file().is_some());
        }
    }
}
