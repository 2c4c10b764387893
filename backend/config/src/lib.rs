//! `linedrop-config`: runtime configuration for the linedrop webhook.
//!
//! Provides:
//! - Channel credentials resolved from env vars with plaintext-file fallback
//! - Fixed runtime settings (bind address, save directory, content API base)
//! - Secret masking for safe logging

pub mod credentials;
pub mod redact;
pub mod settings;

pub use credentials::{
    Credentials, CHANNEL_ACCESS_TOKEN, CHANNEL_ACCESS_TOKEN_FILE, CHANNEL_SECRET,
    CHANNEL_SECRET_FILE,
};
pub use redact::mask_secret;
pub use settings::Settings;
