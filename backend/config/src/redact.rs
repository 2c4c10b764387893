//! Secret masking for log and debug output.

/// Mask a secret, keeping the first 4 characters as a hint when it is long enough.
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    if secret.chars().count() > 8 {
        let hint: String = secret.chars().take(4).collect();
        format!("{hint}***")
    } else {
        "***".to_string()
    }
}
