use std::path::PathBuf;

/// Address the webhook server binds to.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
/// Directory downloaded images are written to.
pub const DEFAULT_SAVE_DIR: &str = "Save_Path";
/// Host serving message content (`/v2/bot/message/{id}/content`).
pub const DEFAULT_CONTENT_API_BASE: &str = "https://api-data.line.me";
pub const DEFAULT_WEBHOOK_PATH: &str = "/callback";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// linedrop runtime settings.
///
/// The service takes no flags; only logging is tunable via the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub save_dir: PathBuf,
    pub content_api_base: String,
    pub webhook_path: String,
    /// Directory for the rolling JSON log file.
    pub log_dir: PathBuf,
    /// Fallback filter; `RUST_LOG` is consulted by the logger itself.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            content_api_base: DEFAULT_CONTENT_API_BASE.to_string(),
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings, reading `LINEDROP_LOG_DIR` from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var_os(name).map(PathBuf::from))
    }

    /// Load settings using a provided env lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        Self {
            log_dir: lookup("LINEDROP_LOG_DIR").unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            ..Self::default()
        }
    }
}
