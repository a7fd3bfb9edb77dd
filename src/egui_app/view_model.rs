//! Helpers to convert upload state into egui-facing view structs.

use crate::egui_app::state::{PreviewReference, UploadPhase, UploadViewState};
use crate::prediction::PredictionResult;

pub const SUBMIT_LABEL: &str = "Predict Grade";
pub const SUBMITTING_LABEL: &str = "Predicting...";
pub const RESET_LABEL: &str = "Predict Another Image";

/// One line of the probability table.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityRow {
    pub class_label: String,
    pub probability: String,
}

/// What the central card should draw this frame.
#[derive(Debug, PartialEq)]
pub enum ScreenModel<'a> {
    Form(FormModel<'a>),
    Result(ResultModel<'a>),
}

#[derive(Debug, PartialEq)]
pub struct FormModel<'a> {
    pub file_name: Option<&'a str>,
    pub preview: Option<&'a PreviewReference>,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    /// File picker and clear control accept input.
    pub selection_enabled: bool,
    pub loading_text: Option<&'static str>,
    pub error: Option<&'a str>,
    pub input_generation: u64,
}

#[derive(Debug, PartialEq)]
pub struct ResultModel<'a> {
    pub preview: &'a PreviewReference,
    pub file_name: &'a str,
    pub prediction: &'a str,
    pub rows: Vec<ProbabilityRow>,
}

/// Convert the response probabilities into display rows, keeping service order.
pub fn probability_rows(result: &PredictionResult) -> Vec<ProbabilityRow> {
    result
        .probabilities
        .iter()
        .map(|entry| ProbabilityRow {
            class_label: format!("Class {}:", entry.class),
            probability: entry.probability.to_string(),
        })
        .collect()
}

/// Pick the screen for the current phase.
pub fn screen(upload: &UploadViewState) -> ScreenModel<'_> {
    if let UploadPhase::Result {
        selection,
        prediction,
    } = &upload.phase
    {
        return ScreenModel::Result(ResultModel {
            preview: &selection.preview,
            file_name: selection.file.name(),
            prediction: &prediction.prediction,
            rows: probability_rows(prediction),
        });
    }
    let loading = upload.phase.is_loading();
    ScreenModel::Form(FormModel {
        file_name: upload.phase.selected_file().map(|file| file.name()),
        preview: upload.phase.preview(),
        submit_label: if loading { SUBMITTING_LABEL } else { SUBMIT_LABEL },
        submit_enabled: !loading,
        selection_enabled: !loading,
        loading_text: loading.then_some(SUBMITTING_LABEL),
        error: upload.phase.error_message(),
        input_generation: upload.input_generation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::state::{Selection, SelectedFile, VALIDATION_MESSAGE};
    use crate::prediction::{ClassLabel, ClassProbability, ImageUpload};
    use std::sync::Arc;

    fn selection() -> Selection {
        Selection {
            file: SelectedFile {
                upload: ImageUpload {
                    file_name: "knee.png".into(),
                    bytes: Arc::from(&[0u8; 4][..]),
                },
                path: None,
            },
            preview: PreviewReference {
                texture_key: "preview-0-1".into(),
                image: None,
            },
        }
    }

    fn state(phase: UploadPhase) -> UploadViewState {
        UploadViewState {
            phase,
            input_generation: 3,
        }
    }

    #[test]
    fn grade_two_renders_two_rows_in_order() {
        let result = PredictionResult {
            prediction: "Grade 2".into(),
            probabilities: vec![
                ClassProbability {
                    class: ClassLabel::Number(2u64.into()),
                    probability: 0.75,
                },
                ClassProbability {
                    class: ClassLabel::Text("1".into()),
                    probability: 0.25,
                },
            ],
        };
        let upload = state(UploadPhase::Result {
            selection: selection(),
            prediction: result,
        });

        let ScreenModel::Result(model) = screen(&upload) else {
            panic!("expected result screen");
        };
        assert_eq!(model.prediction, "Grade 2");
        assert_eq!(
            model.rows,
            vec![
                ProbabilityRow {
                    class_label: "Class 2:".into(),
                    probability: "0.75".into(),
                },
                ProbabilityRow {
                    class_label: "Class 1:".into(),
                    probability: "0.25".into(),
                },
            ]
        );
    }

    #[test]
    fn submitting_disables_controls_and_shows_loading_line() {
        let upload = state(UploadPhase::Submitting {
            selection: selection(),
            request_id: 1,
        });
        let ScreenModel::Form(form) = screen(&upload) else {
            panic!("expected form");
        };
        assert_eq!(form.submit_label, SUBMITTING_LABEL);
        assert!(!form.submit_enabled);
        assert!(!form.selection_enabled);
        assert_eq!(form.loading_text, Some(SUBMITTING_LABEL));
        assert!(form.error.is_none());
    }

    #[test]
    fn idle_form_allows_submit_so_validation_can_fire() {
        let idle = state(UploadPhase::Idle);
        let ScreenModel::Form(form) = screen(&idle) else {
            panic!("expected form");
        };
        assert_eq!(form.submit_label, SUBMIT_LABEL);
        assert!(form.submit_enabled);
        assert!(form.preview.is_none());
        assert_eq!(form.input_generation, 3);
    }

    #[test]
    fn validation_error_renders_on_form() {
        let upload = state(UploadPhase::Failed {
            selection: None,
            message: VALIDATION_MESSAGE.into(),
        });
        let ScreenModel::Form(form) = screen(&upload) else {
            panic!("expected form");
        };
        assert_eq!(form.error, Some(VALIDATION_MESSAGE));
        assert!(form.file_name.is_none());
    }

    #[test]
    fn probabilities_print_in_plain_decimal_notation() {
        let result = PredictionResult {
            prediction: "0".into(),
            probabilities: vec![
                ClassProbability {
                    class: ClassLabel::Number(0u64.into()),
                    probability: 1e-7,
                },
                ClassProbability {
                    class: ClassLabel::Number(1u64.into()),
                    probability: 1.0,
                },
            ],
        };
        let printed: Vec<String> = probability_rows(&result)
            .into_iter()
            .map(|row| row.probability)
            .collect();
        assert_eq!(printed, ["0.0000001", "1"]);
    }
}
