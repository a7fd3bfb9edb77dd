use std::io::Write;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::app_dirs;

use super::types::{AppConfig, ConfigError};

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that overrides `service.base_url`.
pub const SERVICE_URL_ENV: &str = "KNEEGRADE_SERVICE_URL";

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if missing.
///
/// `KNEEGRADE_SERVICE_URL`, when set and non-empty, replaces the configured
/// service base URL. The resulting URL is validated before returning.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    let mut config = load_from(&path)?;
    if let Some(url) = std::env::var(SERVICE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
    {
        config.service.base_url = url;
    }
    config.service.predict_url()?;
    Ok(config)
}

/// Read settings from a specific TOML file; a missing file yields defaults.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(config, &path)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes())
}

/// Write through a sibling temp file so a crash never leaves a partial config.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    let write_err = |path: &Path, source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path.file_name().ok_or_else(|| {
        write_err(
            path,
            std::io::Error::new(std::io::ErrorKind::Other, "config path has no file name"),
        )
    })?;
    let tmp_path = path.with_file_name(format!(
        "{}.tmp-{}",
        file_name.to_string_lossy(),
        Uuid::new_v4().simple()
    ));

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| write_err(&tmp_path, source))?;
    if let Err(err) = file.write_all(data).and_then(|_| file.sync_all()) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(&tmp_path, err));
    }
    drop(file);
    replace_file(&tmp_path, path).map_err(|err| {
        let _ = std::fs::remove_file(&tmp_path);
        write_err(path, err)
    })
}

fn replace_file(temp_path: &Path, path: &Path) -> Result<(), std::io::Error> {
    match std::fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        #[cfg(target_os = "windows")]
        Err(err)
            if err.kind() == std::io::ErrorKind::AlreadyExists
                || err.kind() == std::io::ErrorKind::PermissionDenied =>
        {
            std::fs::remove_file(path)?;
            std::fs::rename(temp_path, path)
        }
        Err(err) => Err(err),
    }
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
