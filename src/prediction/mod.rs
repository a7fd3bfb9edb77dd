//! Client side of the remote image prediction service.

mod multipart;

pub mod api;

pub use api::{
    ClassLabel, ClassProbability, GENERIC_ERROR_MESSAGE, HttpPredictionService, ImageUpload,
    PredictError, PredictionResult, PredictionService,
};
