use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::OutputFormat;
use crate::due_date::{due_date_at, format_due_date};

/// Due date computed for a priority
#[derive(Debug, Serialize)]
pub struct DueDateResponse {
    pub priority: Option<String>,
    pub now: String,
    pub due_date: String,
}

impl std::fmt::Display for DueDateResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.priority.as_deref().unwrap_or("(none)"),
            self.due_date
        )
    }
}

/// Show the due date a priority maps to
pub fn run_due_date(priority: Option<&str>, now: Option<&str>, format: OutputFormat) -> Result<()> {
    let now = match now {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid --now timestamp: {}", s))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    format.print(&DueDateResponse {
        priority: priority.map(|p| p.to_string()),
        now: format_due_date(now),
        due_date: format_due_date(due_date_at(now, priority)),
    });
    Ok(())
}
