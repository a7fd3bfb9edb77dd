use super::*;
use crate::config::{self, AppConfig, ConfigError};
use crate::prediction::HttpPredictionService;

impl EguiController {
    /// Build a controller talking to the endpoint described by `cfg`.
    pub fn from_config(cfg: &AppConfig) -> Result<Self, ConfigError> {
        let service = HttpPredictionService::new(&cfg.service)?;
        crate::logging::log_service_settings(&cfg.service);
        let mut controller = Self::new(Arc::new(service));
        controller.ui.title = cfg.ui.title.clone();
        Ok(controller)
    }

    /// Load persisted configuration, falling back to defaults when it is unusable.
    pub fn from_saved_config() -> Result<Self, ConfigError> {
        match config::load_or_default() {
            Ok(cfg) => Self::from_config(&cfg),
            Err(err) => {
                tracing::warn!("Config load failed, using defaults: {err}");
                let mut controller = Self::from_config(&AppConfig::default())?;
                controller.set_status(
                    format!("Config load failed, using defaults: {err}"),
                    StatusTone::Warning,
                );
                Ok(controller)
            }
        }
    }
}
