//! `X-Line-Signature` validation.
//!
//! The header carries base64(HMAC-SHA256(channel_secret, raw_body)). The body
//! must be the exact bytes received; re-serialized JSON will not match.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use linedrop_core::LinedropError;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(channel_secret: &str, body: &[u8]) -> Result<HmacSha256, LinedropError> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .map_err(|_| LinedropError::InvalidSignature)?;
    mac.update(body);
    Ok(mac)
}

/// Compute the base64 signature LINE would send for `body`.
pub fn compute_signature(channel_secret: &str, body: &[u8]) -> Result<String, LinedropError> {
    let mac = keyed_mac(channel_secret, body)?;
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Check `signature` against `body`, comparing digests in constant time.
pub fn verify_signature(
    channel_secret: &str,
    body: &[u8],
    signature: &str,
) -> Result<(), LinedropError> {
    let expected = STANDARD
        .decode(signature)
        .map_err(|_| LinedropError::InvalidSignature)?;
    keyed_mac(channel_secret, body)?
        .verify_slice(&expected)
        .map_err(|_| LinedropError::InvalidSignature)
}
