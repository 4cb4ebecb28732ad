use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::{read_payload, resolve_secret, OutputFormat};
use crate::webhook::{format_signature_header, SIGNATURE_HEADER};

/// Signature produced for a payload
#[derive(Debug, Serialize)]
pub struct SignResponse {
    pub header: String,
    pub value: String,
}

impl std::fmt::Display for SignResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.header, self.value)
    }
}

/// Result of a signed test delivery
#[derive(Debug, Serialize)]
pub struct SendResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl std::fmt::Display for SendResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "POST {} -> {}", self.url, self.status)?;
        if !self.body.is_empty() {
            writeln!(f, "{}", self.body)?;
        }
        Ok(())
    }
}

/// Print the signature header for a payload
pub fn run_sign(
    payload_path: &str,
    secret: Option<&str>,
    timestamp: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    let secret = resolve_secret(secret)?;
    let payload = read_payload(payload_path)?;
    let timestamp = timestamp.unwrap_or_else(|| Utc::now().timestamp());

    format.print(&SignResponse {
        header: SIGNATURE_HEADER.to_string(),
        value: format_signature_header(timestamp, &payload, &secret),
    });
    Ok(())
}

/// Sign a payload and POST it to a running receiver
pub async fn run_send(
    url: &str,
    payload_path: &str,
    secret: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let secret = resolve_secret(secret)?;
    let payload = read_payload(payload_path)?;
    let signature = format_signature_header(Utc::now().timestamp(), &payload, &secret);

    let resp = reqwest::Client::new()
        .post(url)
        .header("Content-Type", "application/json")
        .header(SIGNATURE_HEADER, signature)
        .body(payload)
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await
        .context("Failed to send webhook")?;

    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();

    format.print(&SendResponse {
        url: url.to_string(),
        status,
        body,
    });

    if !(200..300).contains(&status) {
        anyhow::bail!("Webhook delivery failed with status {}", status);
    }
    Ok(())
}
