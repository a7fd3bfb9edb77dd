use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

const CONFIG_HOME_ENV: &str = "KNEEGRADE_CONFIG_HOME";
const SERVICE_URL_ENV: &str = "KNEEGRADE_SERVICE_URL";

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app at a private config home and clears the service URL override.
pub struct KneegradeEnvGuard {
    previous_home: Option<String>,
    previous_url: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl KneegradeEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME_ENV).ok();
        let previous_url = std::env::var(SERVICE_URL_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(SERVICE_URL_ENV);
        }
        Self {
            previous_home,
            previous_url,
            _lock: lock,
        }
    }
}

impl Drop for KneegradeEnvGuard {
    fn drop(&mut self) {
        restore(CONFIG_HOME_ENV, self.previous_home.take());
        restore(SERVICE_URL_ENV, self.previous_url.take());
    }
}

fn restore(key: &str, value: Option<String>) {
    // SAFETY: tests run under a global lock to prevent concurrent env mutations.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}
