use super::*;
use crate::prediction::{
    ClassLabel, ClassProbability, ImageUpload, PredictError, PredictionResult,
};
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Fake prediction service replaying queued replies and counting calls.
#[derive(Default)]
pub(super) struct ScriptedService {
    calls: AtomicUsize,
    replies: Mutex<VecDeque<Result<PredictionResult, PredictError>>>,
    uploads: Mutex<Vec<ImageUpload>>,
    gate: Mutex<Option<Receiver<()>>>,
}

impl ScriptedService {
    pub(super) fn replying(reply: Result<PredictionResult, PredictError>) -> Arc<Self> {
        let service = Self::default();
        service.push_reply(reply);
        Arc::new(service)
    }

    /// Like [`Self::replying`], but every call blocks until the returned sender fires.
    pub(super) fn gated(reply: Result<PredictionResult, PredictError>) -> (Arc<Self>, Sender<()>) {
        let (tx, rx) = mpsc::channel();
        let service = Self::default();
        service.push_reply(reply);
        *service.gate.lock().unwrap() = Some(rx);
        (Arc::new(service), tx)
    }

    pub(super) fn push_reply(&self, reply: Result<PredictionResult, PredictError>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn uploads(&self) -> Vec<ImageUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

impl PredictionService for ScriptedService {
    fn predict(&self, upload: &ImageUpload) -> Result<PredictionResult, PredictError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().unwrap().push(upload.clone());
        if let Some(gate) = self.gate.lock().unwrap().as_ref() {
            let _ = gate.recv_timeout(Duration::from_secs(5));
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PredictError::Transport("no scripted reply".into())))
    }
}

/// Service whose every call panics, standing in for a crashing client.
pub(super) struct PanickingService;

impl PredictionService for PanickingService {
    fn predict(&self, _upload: &ImageUpload) -> Result<PredictionResult, PredictError> {
        panic!("service blew up");
    }
}

pub(super) fn controller_with(service: Arc<ScriptedService>) -> EguiController {
    EguiController::new(service)
}

pub(super) fn selected_file(name: &str) -> SelectedFile {
    SelectedFile {
        upload: ImageUpload {
            file_name: name.to_string(),
            bytes: Arc::from(png_bytes(2, 2)),
        },
        path: None,
    }
}

pub(super) fn grade(prediction: &str, probabilities: &[(i64, f64)]) -> PredictionResult {
    PredictionResult {
        prediction: prediction.to_string(),
        probabilities: probabilities
            .iter()
            .map(|(class, probability)| ClassProbability {
                class: ClassLabel::Number((*class).into()),
                probability: *probability,
            })
            .collect(),
    }
}

/// Tick until the in-flight request lands, failing the test after a few seconds.
pub(super) fn wait_for_idle_job(controller: &mut EguiController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    controller.tick();
    while controller.is_loading() {
        assert!(Instant::now() < deadline, "prediction did not finish");
        std::thread::sleep(Duration::from_millis(5));
        controller.tick();
    }
}

pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 80, 120, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}
