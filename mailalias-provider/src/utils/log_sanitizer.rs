//! Log sanitization utilities
//!
//! Keeps response bodies (record listings, relay acknowledgements) from
//! flooding debug/error logs, and masks secrets before they reach a log line.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` characters with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret for logging, keeping only the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let visible = secret.len().saturating_sub(4);
    if secret.len() <= 8 || !secret.is_char_boundary(visible) {
        "***".to_string()
    } else {
        format!("***{}", &secret[visible..])
    }
}
