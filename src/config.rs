//! Persisted application settings stored as TOML in the app directory.

mod io;
mod types;

pub use io::{CONFIG_FILE_NAME, SERVICE_URL_ENV, config_path, load_from, load_or_default, save, save_to_path};
pub use types::{AppConfig, ConfigError, ServiceSettings, UiSettings};
