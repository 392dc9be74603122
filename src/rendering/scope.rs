//! Scope identifiers for the per-container responsive style rule

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};

pub const SCOPE_PREFIX: &str = "columns-container-";

/// Length of the hashed part of generated tokens (hex digits)
pub const TOKEN_LEN: usize = 7;

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn salt() -> &'static [u8] {
    static SALT: OnceLock<Vec<u8>> = OnceLock::new();
    SALT.get_or_init(|| {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let mut s = Vec::with_capacity(20);
        s.extend_from_slice(&std::process::id().to_le_bytes());
        s.extend_from_slice(&nanos.to_le_bytes());
        s
    })
}

/// A fresh token; distinct for every call within the process.
///
/// `TOKEN_LEN` hex digits of the salted hash, then the counter in hex.
pub fn next_token() -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut hasher = Sha256::new();
    hasher.update(salt());
    hasher.update(n.to_le_bytes());
    let mut token = hex::encode(hasher.finalize());
    token.truncate(TOKEN_LEN);
    token.push_str(&format!("{:x}", n));
    token
}

/// Keep `[A-Za-z0-9_-]`, replace anything else with `-`
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Reversible escape into `[A-Za-z0-9_-]`: each other byte becomes `_xx`
/// (`_` itself included), so distinct inputs stay distinct.
pub fn escape_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            out.push(char::from(b));
        } else {
            out.push('_');
            out.push_str(&hex::encode([b]));
        }
    }
    out
}

/// Element id for a container: caller key when given, otherwise generated
pub fn scope_id(key: Option<&str>) -> String {
    let suffix = match key.map(sanitize_key) {
        Some(k) if !k.is_empty() => k,
        _ => next_token(),
    };
    format!("{}{}", SCOPE_PREFIX, suffix)
}
