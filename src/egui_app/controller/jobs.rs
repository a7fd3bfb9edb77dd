use crate::prediction::{ImageUpload, PredictError, PredictionResult, PredictionService};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        mpsc::{Receiver, Sender},
    },
    thread,
    time::{Duration, Instant},
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    PredictionFinished(PredictionJobResult),
}

pub(crate) struct PredictionJob {
    pub(crate) request_id: u64,
    pub(crate) upload: ImageUpload,
    pub(crate) service: Arc<dyn PredictionService>,
}

#[derive(Debug)]
pub(crate) struct PredictionJobResult {
    pub(crate) request_id: u64,
    pub(crate) result: Result<PredictionResult, PredictError>,
    pub(crate) elapsed: Duration,
}

pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    prediction_in_progress: bool,
    next_request_id: u64,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            message_tx,
            message_rx,
            prediction_in_progress: false,
            next_request_id: 1,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn next_request_id(&mut self) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1).max(1);
        request_id
    }

    pub(super) fn prediction_in_progress(&self) -> bool {
        self.prediction_in_progress
    }

    /// Spawn the request unless one is already running. Returns whether it started.
    pub(super) fn begin_prediction(&mut self, job: PredictionJob) -> bool {
        if self.prediction_in_progress {
            return false;
        }
        self.prediction_in_progress = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let started = Instant::now();
            // A panicking service still has to report, or the view stays in Submitting.
            let result = panic::catch_unwind(AssertUnwindSafe(|| job.service.predict(&job.upload)))
                .unwrap_or_else(|_| {
                    tracing::error!(request_id = job.request_id, "Prediction worker panicked");
                    Err(PredictError::Transport("prediction worker panicked".to_string()))
                });
            let _ = tx.send(JobMessage::PredictionFinished(PredictionJobResult {
                request_id: job.request_id,
                result,
                elapsed: started.elapsed(),
            }));
        });
        true
    }

    pub(super) fn clear_prediction(&mut self) {
        self.prediction_in_progress = false;
    }
}
