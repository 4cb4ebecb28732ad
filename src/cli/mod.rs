mod deliver;
mod due_date;

pub use deliver::*;
pub use due_date::*;

use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn print<T: Serialize + std::fmt::Display>(&self, value: &T) {
        match self {
            OutputFormat::Human => println!("{}", value),
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

/// Read a payload from a file, or stdin when the path is `-`
pub fn read_payload(path: &str) -> anyhow::Result<Vec<u8>> {
    use anyhow::Context;
    use std::io::Read;

    if path == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read payload from stdin")?;
        Ok(buf)
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read payload from {}", path))
    }
}

/// Webhook secret from the command line, falling back to `WEBHOOK_SECRET`
pub fn resolve_secret(secret: Option<&str>) -> anyhow::Result<String> {
    secret
        .map(|s| s.to_string())
        .or_else(|| std::env::var("WEBHOOK_SECRET").ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("No webhook secret. Pass --secret or set WEBHOOK_SECRET."))
}
