use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::sync::Arc;

use crate::clock::Clock;
use crate::models::Priority;

/// Due date for a work order of the given priority, relative to `now`.
///
/// Unrecognized or missing priorities fall back to the LOW offset.
pub fn due_date_at(now: DateTime<Utc>, priority: Option<&str>) -> DateTime<Utc> {
    let offset = match priority.and_then(Priority::parse) {
        Some(p) => p.offset_days(),
        None => {
            tracing::warn!(
                priority = ?priority,
                "Unrecognized priority {:?}, using {} offset",
                priority,
                Priority::Low
            );
            Priority::Low.offset_days()
        }
    };

    now + Duration::days(offset)
}

/// ISO-8601, UTC, millisecond precision (`2024-06-16T12:00:00.000Z`)
pub fn format_due_date(due: DateTime<Utc>) -> String {
    due.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Maps priorities to due dates using an injected clock
#[derive(Clone)]
pub struct DueDateCalculator {
    clock: Arc<dyn Clock>,
}

impl DueDateCalculator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn calculate(&self, priority: Option<&str>) -> String {
        format_due_date(due_date_at(self.clock.now(), priority))
    }
}
