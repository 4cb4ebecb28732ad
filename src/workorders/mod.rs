mod client;

pub use client::*;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use thiserror::Error;

use crate::models::WorkOrderSnapshot;

/// Rate-limit response headers sent by the work order API
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-rate-limit-remaining";
pub const RATE_LIMIT_RESET_HEADER: &str = "x-rate-limit-reset";

/// Retry hint used when a 429 carries no reset header
pub const DEFAULT_RATE_LIMIT_RESET_SECS: u64 = 10;

/// Trait for the remote work order service
#[async_trait]
pub trait WorkOrderApi: Send + Sync {
    /// Fetch the current state of a work order
    async fn get_work_order(&self, id: u64) -> Result<WorkOrderSnapshot, WorkOrderApiError>;

    /// Set a work order's due date
    async fn update_due_date(
        &self,
        id: u64,
        due_date: &str,
    ) -> Result<UpdateReceipt, WorkOrderApiError>;
}

/// Rate-limit metadata from a response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: Option<String>,
    pub reset: Option<String>,
}

impl RateLimit {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        Self {
            remaining: read(RATE_LIMIT_REMAINING_HEADER),
            reset: read(RATE_LIMIT_RESET_HEADER),
        }
    }

    pub fn remaining_or_na(&self) -> &str {
        self.remaining.as_deref().unwrap_or("N/A")
    }

    pub fn reset_or_na(&self) -> &str {
        self.reset.as_deref().unwrap_or("N/A")
    }

    /// Seconds until the quota resets
    pub fn reset_secs(&self) -> u64 {
        self.reset
            .as_deref()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_RESET_SECS)
    }
}

/// Successful due-date update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReceipt {
    pub status: u16,
    pub rate_limit: RateLimit,
}

#[derive(Debug, Error)]
pub enum WorkOrderApiError {
    #[error("work order API responded with {status}: {body}")]
    Status {
        status: u16,
        body: String,
        rate_limit: RateLimit,
    },
    #[error("work order API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl WorkOrderApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            WorkOrderApiError::Status { status, .. } => Some(*status),
            WorkOrderApiError::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Retry hint in seconds, from the reset header when present
    pub fn retry_after_secs(&self) -> u64 {
        match self {
            WorkOrderApiError::Status { rate_limit, .. } => rate_limit.reset_secs(),
            WorkOrderApiError::Request(_) => DEFAULT_RATE_LIMIT_RESET_SECS,
        }
    }

    /// What to report: the remote body if there is one, else the error itself
    pub fn payload(&self) -> String {
        match self {
            WorkOrderApiError::Status { body, .. } if !body.trim().is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_rate_limit_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from_static("42"));
        headers.insert(RATE_LIMIT_RESET_HEADER, HeaderValue::from_static("60"));

        let rate_limit = RateLimit::from_headers(&headers);
        assert_eq!(rate_limit.remaining_or_na(), "42");
        assert_eq!(rate_limit.reset_secs(), 60);
    }

    #[test]
    fn test_rate_limit_missing_headers() {
        let rate_limit = RateLimit::from_headers(&HeaderMap::new());
        assert_eq!(rate_limit.remaining_or_na(), "N/A");
        assert_eq!(rate_limit.reset_or_na(), "N/A");
        assert_eq!(rate_limit.reset_secs(), DEFAULT_RATE_LIMIT_RESET_SECS);
    }

    #[test]
    fn test_error_payload_prefers_body() {
        let err = WorkOrderApiError::Status {
            status: 500,
            body: r#"{"error":"database unavailable"}"#.to_string(),
            rate_limit: RateLimit::default(),
        };
        assert_eq!(err.payload(), r#"{"error":"database unavailable"}"#);
        assert!(!err.is_rate_limited());

        let empty = WorkOrderApiError::Status {
            status: 502,
            body: String::new(),
            rate_limit: RateLimit::default(),
        };
        assert!(empty.payload().contains("502"));
    }

    #[test]
    fn test_rate_limited_error_retry_hint() {
        let err = WorkOrderApiError::Status {
            status: 429,
            body: String::new(),
            rate_limit: RateLimit {
                remaining: Some("0".to_string()),
                reset: None,
            },
        };
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after_secs(), DEFAULT_RATE_LIMIT_RESET_SECS);
    }
}
