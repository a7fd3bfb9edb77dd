//! HTTP client for the `/api/predict/` endpoint.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use url::Url;

use super::multipart::{MultipartForm, content_type_for};
use crate::config::{ConfigError, ServiceSettings};
use crate::http_client;

/// Shown when the service gives no usable error text.
pub const GENERIC_ERROR_MESSAGE: &str = "Error uploading file or making prediction.";

/// Name of the multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// Image bytes and the filename reported to the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

/// Class identifier as returned by the service; either a number or a name.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClassProbability {
    pub class: ClassLabel,
    pub probability: f64,
}

/// Successful prediction: the grade plus per-class probabilities in service order.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub prediction: String,
    #[serde(default)]
    pub probabilities: Vec<ClassProbability>,
}

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// Non-2xx status; `service_message` is the body's `error` field if any.
    #[error("HTTP {code}: {body}")]
    Status {
        code: u16,
        service_message: Option<String>,
        body: String,
    },
    /// 2xx response that reported an error instead of a prediction.
    #[error("Service error: {0}")]
    Service(String),
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl PredictError {
    /// Text suitable for showing next to the upload form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                service_message: Some(message),
                ..
            }
            | Self::Service(message) => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Something that can turn an image into a prediction.
///
/// Calls block; the controller runs them on a worker thread.
pub trait PredictionService: Send + Sync {
    fn predict(&self, upload: &ImageUpload) -> Result<PredictionResult, PredictError>;
}

/// [`PredictionService`] backed by the remote HTTP endpoint.
pub struct HttpPredictionService {
    agent: ureq::Agent,
    predict_url: Url,
    max_response_bytes: usize,
}

impl HttpPredictionService {
    pub fn new(settings: &ServiceSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: http_client::build_agent(settings.request_timeout()),
            predict_url: settings.predict_url()?,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

impl PredictionService for HttpPredictionService {
    fn predict(&self, upload: &ImageUpload) -> Result<PredictionResult, PredictError> {
        let mut form = MultipartForm::new();
        form.add_file(
            FILE_FIELD,
            &upload.file_name,
            content_type_for(&upload.file_name),
            &upload.bytes,
        );
        let content_type = form.content_type();
        let body = form.finish();
        tracing::debug!(
            url = %self.predict_url,
            bytes = body.len(),
            "Posting image to prediction service"
        );

        let request = self
            .agent
            .post(self.predict_url.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", &content_type);
        let response = match request.send_bytes(&body) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response, self.max_response_bytes)
                    .unwrap_or_else(|err| err);
                return Err(map_status_error(code, body));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(PredictError::Transport(err.to_string()));
            }
        };

        let body = read_body_limited(response, self.max_response_bytes)
            .map_err(PredictError::InvalidResponse)?;
        parse_prediction_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct PredictionResponseWire {
    prediction: Option<String>,
    #[serde(default)]
    probabilities: Vec<ClassProbability>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBodyWire {
    error: Option<String>,
}

fn parse_prediction_response(body: &str) -> Result<PredictionResult, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::InvalidResponse(
            "Empty response body".to_string(),
        ));
    }
    let parsed: PredictionResponseWire = serde_json::from_str(trimmed)
        .map_err(|err| PredictError::InvalidResponse(format!("{err}: {trimmed}")))?;
    match (parsed.prediction, parsed.error) {
        (Some(prediction), _) => Ok(PredictionResult {
            prediction,
            probabilities: parsed.probabilities,
        }),
        (None, Some(error)) if !error.trim().is_empty() => Err(PredictError::Service(error)),
        (None, _) => Err(PredictError::InvalidResponse(format!(
            "Missing prediction in response: {trimmed}"
        ))),
    }
}

fn map_status_error(code: u16, body: String) -> PredictError {
    let service_message = serde_json::from_str::<ErrorBodyWire>(body.trim())
        .ok()
        .and_then(|wire| wire.error)
        .filter(|message| !message.trim().is_empty());
    PredictError::Status {
        code,
        service_message,
        body,
    }
}

fn read_body_limited(response: ureq::Response, max_bytes: usize) -> Result<String, String> {
    let bytes = http_client::read_response_bytes(response, max_bytes)
        .map_err(|err| err.to_string())?;
    String::from_utf8(bytes).map_err(|err| err.to_string())
}
