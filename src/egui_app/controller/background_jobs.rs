use super::jobs::{JobMessage, PredictionJobResult};
use super::*;

impl EguiController {
    pub(in crate::egui_app::controller) fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.runtime.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::PredictionFinished(message) => {
                    self.runtime.jobs.clear_prediction();
                    self.apply_prediction_finished(message);
                }
            }
        }
    }

    fn apply_prediction_finished(&mut self, message: PredictionJobResult) {
        let phase = std::mem::take(&mut self.ui.upload.phase);
        let selection = match phase {
            UploadPhase::Submitting {
                selection,
                request_id,
            } if request_id == message.request_id => selection,
            other => {
                tracing::debug!(
                    request_id = message.request_id,
                    stage = ?other.stage(),
                    "Discarding stale prediction result"
                );
                self.ui.upload.phase = other;
                return;
            }
        };

        match message.result {
            Ok(prediction) => {
                tracing::info!(
                    file = %selection.file.name(),
                    grade = %prediction.prediction,
                    classes = prediction.probabilities.len(),
                    elapsed_ms = message.elapsed.as_millis() as u64,
                    "Prediction received"
                );
                self.set_status(
                    format!("Predicted {} for {}", prediction.prediction, selection.file.name()),
                    StatusTone::Info,
                );
                self.ui.upload.phase = UploadPhase::Result {
                    selection,
                    prediction,
                };
            }
            Err(err) => {
                tracing::warn!(
                    file = %selection.file.name(),
                    elapsed_ms = message.elapsed.as_millis() as u64,
                    "Prediction failed: {err}"
                );
                let text = err.user_message();
                self.set_status(format!("Prediction failed: {text}"), StatusTone::Error);
                self.ui.upload.phase = UploadPhase::Failed {
                    selection: Some(selection),
                    message: text,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::controller::test_support::{
        ScriptedService, controller_with, grade, selected_file,
    };
    use std::time::Duration;

    #[test]
    fn result_for_another_request_is_discarded() {
        let service = ScriptedService::replying(Ok(grade("1", &[])));
        let mut controller = controller_with(service);
        controller.select_file(selected_file("knee.png"));
        let ready = controller.ui.upload.phase.clone();
        let UploadPhase::Ready(selection) = ready else {
            panic!("expected ready phase");
        };
        controller.ui.upload.phase = UploadPhase::Submitting {
            selection,
            request_id: 5,
        };

        controller.apply_prediction_finished(PredictionJobResult {
            request_id: 4,
            result: Ok(grade("3", &[])),
            elapsed: Duration::ZERO,
        });

        assert_eq!(controller.ui.upload.phase.pending_request(), Some(5));
    }

    #[test]
    fn late_result_after_reset_leaves_idle_untouched() {
        let service = ScriptedService::replying(Ok(grade("1", &[])));
        let mut controller = controller_with(service);

        controller.apply_prediction_finished(PredictionJobResult {
            request_id: 1,
            result: Ok(grade("2", &[])),
            elapsed: Duration::ZERO,
        });

        assert_eq!(controller.ui.upload.phase, UploadPhase::Idle);
    }
}
