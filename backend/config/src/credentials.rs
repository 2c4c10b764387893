//! Channel credential resolution.
//!
//! Each credential is read from its environment variable; when the variable
//! is unset or empty, from a plaintext file of the same name plus `.txt` in
//! the working directory. Surrounding whitespace is stripped from file values.

use std::fmt;
use std::path::Path;

use linedrop_core::LinedropError;
use tracing::debug;

use crate::redact::mask_secret;

/// Env var holding the bearer token for platform API calls.
pub const CHANNEL_ACCESS_TOKEN: &str = "CHANNEL_ACCESS_TOKEN";
/// Env var holding the HMAC key for webhook signatures.
pub const CHANNEL_SECRET: &str = "CHANNEL_SECRET";

pub const CHANNEL_ACCESS_TOKEN_FILE: &str = "CHANNEL_ACCESS_TOKEN.txt";
pub const CHANNEL_SECRET_FILE: &str = "CHANNEL_SECRET.txt";

/// LINE channel credentials, read once at startup.
#[derive(Clone)]
pub struct Credentials {
    pub channel_access_token: String,
    pub channel_secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("channel_access_token", &mask_secret(&self.channel_access_token))
            .field("channel_secret", &mask_secret(&self.channel_secret))
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials from the process environment, falling back to
    /// files in the current directory.
    ///
    /// Only the two credential variables are read; other entries in the
    /// environment are never inspected.
    pub fn load() -> Result<Self, LinedropError> {
        Self::load_with(|name| std::env::var(name).ok(), Path::new("."))
    }

    /// Resolve credentials using a provided env lookup and fallback directory.
    pub fn load_with<F>(lookup: F, dir: &Path) -> Result<Self, LinedropError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            channel_access_token: resolve(&lookup, dir, CHANNEL_ACCESS_TOKEN, CHANNEL_ACCESS_TOKEN_FILE)?,
            channel_secret: resolve(&lookup, dir, CHANNEL_SECRET, CHANNEL_SECRET_FILE)?,
        })
    }
}

fn resolve<F>(lookup: &F, dir: &Path, var: &str, file_name: &str) -> Result<String, LinedropError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
        debug!(name = var, "Credential resolved from environment");
        return Ok(value);
    }

    let path = dir.join(file_name);
    let raw = std::fs::read_to_string(&path).map_err(|e| LinedropError::StartupCredential {
        name: var.to_string(),
        reason: format!("env var unset and {} unreadable: {e}", path.display()),
    })?;

    let value = raw.trim();
    if value.is_empty() {
        return Err(LinedropError::StartupCredential {
            name: var.to_string(),
            reason: format!("env var unset and {} is empty", path.display()),
        });
    }

    debug!(name = var, path = %path.display(), "Credential resolved from file");
    Ok(value.to_string())
}
