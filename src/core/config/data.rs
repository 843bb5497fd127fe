use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Base URL used when neither the command line, the environment, nor the
/// config file names one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/api";

/// Environment override for the backend base URL.
pub const ENV_API_BASE_URL: &str = "SPUR_API_BASE_URL";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL, e.g. "https://chat.example.com/api"
    pub api_base_url: Option<String>,
    /// Reopen the thread that was selected when the client last exited
    pub resume_last_thread: Option<bool>,
    /// Seconds a notification stays on screen
    pub notification_seconds: Option<u64>,
}

impl Config {
    /// Pick the backend base URL. Precedence: command line, then
    /// `SPUR_API_BASE_URL`, then the config file, then the built-in default.
    pub fn resolve_api_base_url(&self, cli: Option<&str>, env: Option<&str>) -> String {
        [cli, env, self.api_base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn resume_last_thread(&self) -> bool {
        self.resume_last_thread.unwrap_or(true)
    }

    pub fn notification_seconds(&self) -> u64 {
        self.notification_seconds.unwrap_or(5).max(1)
    }
}

/// Get a user-friendly display string for a path, using `~` for the home
/// directory on Unix-like systems.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
