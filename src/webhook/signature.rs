//! Webhook signature verification.
//!
//! The sender signs `"<timestamp>.<body>"` with HMAC-SHA256 using the shared
//! webhook secret and sends the result as `t=<unix-seconds>,v1=<hex-digest>`.
//! A request is accepted only if the digest matches and the timestamp is
//! inside the replay window.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::clock::Clock;

type HmacSha256 = Hmac<Sha256>;

/// Request header carrying the signature
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Default replay window
pub const DEFAULT_TOLERANCE_MINUTES: i64 = 5;

/// Parsed `t=...,v1=...` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    /// Timestamp exactly as sent; this text is what was signed
    pub timestamp: &'a str,
    /// Timestamp in unix seconds
    pub seconds: i64,
    /// Hex-encoded digest
    pub digest: &'a str,
}

/// Parses a signature header into its timestamp and digest.
///
/// Pairs are comma separated and may appear in any order. Unknown keys are
/// ignored. Returns `None` when either component is missing or the
/// timestamp is not an integer.
pub fn parse_signature_header(header: &str) -> Option<SignatureHeader<'_>> {
    let mut timestamp = None;
    let mut digest = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => digest = Some(value),
            _ => {}
        }
    }

    let timestamp = timestamp?;
    let digest = digest.filter(|d| !d.is_empty())?;
    let seconds = timestamp.parse::<i64>().ok()?;

    Some(SignatureHeader {
        timestamp,
        seconds,
        digest,
    })
}

fn keyed_mac(secret: &str, timestamp: &str, body: &[u8]) -> Option<HmacSha256> {
    let message = format!("{}.{}", timestamp, String::from_utf8_lossy(body));
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(message.as_bytes());
    Some(mac)
}

fn is_lower_hex(digest: &str) -> bool {
    digest
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Lower-case hex HMAC-SHA256 of `"<timestamp>.<body>"`
pub fn compute_signature(timestamp: &str, body: &[u8], secret: &str) -> String {
    keyed_mac(secret, timestamp, body)
        .map(|mac| hex::encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Builds a complete header value for a body signed at `timestamp`
pub fn format_signature_header(timestamp: i64, body: &[u8], secret: &str) -> String {
    let timestamp = timestamp.to_string();
    format!(
        "t={},v1={}",
        timestamp,
        compute_signature(&timestamp, body, secret)
    )
}

/// Verifies a signed webhook delivery against `now`.
///
/// Never panics and never errors: every failure is logged and reported as
/// `false`. Timestamps ahead of `now` count as fresh.
pub fn verify_signature(
    signature_header: Option<&str>,
    raw_body: Option<&[u8]>,
    secret: &str,
    tolerance_minutes: i64,
    now: DateTime<Utc>,
) -> bool {
    let header = match signature_header {
        Some(h) => h,
        None => {
            tracing::warn!("Rejected webhook: missing signature header");
            return false;
        }
    };

    let body = match raw_body {
        Some(b) => b,
        None => {
            tracing::warn!("Rejected webhook: missing body");
            return false;
        }
    };

    let parsed = match parse_signature_header(header) {
        Some(p) => p,
        None => {
            tracing::warn!("Rejected webhook: malformed signature header");
            return false;
        }
    };

    // Digest must be lower-case hex. Bytes are compared in constant time by
    // the HMAC library; a wrong length simply fails.
    let digest_valid = is_lower_hex(parsed.digest)
        && match (hex::decode(parsed.digest), keyed_mac(secret, parsed.timestamp, body)) {
            (Ok(provided), Some(mac)) => mac.verify_slice(&provided).is_ok(),
            _ => false,
        };

    let age_ms = now
        .timestamp_millis()
        .saturating_sub(parsed.seconds.saturating_mul(1000));
    let fresh = age_ms < tolerance_minutes.saturating_mul(60 * 1000);

    if !digest_valid {
        tracing::warn!("Rejected webhook: signature digest mismatch");
    }
    if !fresh {
        tracing::warn!(
            age_secs = age_ms / 1000,
            tolerance_minutes,
            "Rejected webhook: timestamp outside replay window"
        );
    }

    digest_valid && fresh
}

/// Signature gate bound to a secret, replay window and clock
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: String,
    tolerance_minutes: i64,
    clock: Arc<dyn Clock>,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>, tolerance_minutes: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret: secret.into(),
            tolerance_minutes,
            clock,
        }
    }

    pub fn verify(&self, signature_header: Option<&str>, raw_body: Option<&[u8]>) -> bool {
        verify_signature(
            signature_header,
            raw_body,
            &self.secret,
            self.tolerance_minutes,
            self.clock.now(),
        )
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("tolerance_minutes", &self.tolerance_minutes)
            .finish_non_exhaustive()
    }
}
