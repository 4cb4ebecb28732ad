use serde::{Deserialize, Serialize};

/// Business fields of a work order relevant to due-date automation.
///
/// Priority is kept as the raw tag so unrecognized values survive
/// deserialization and can be reported. Everything else passes through
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WorkOrderSnapshot {
    pub fn with_priority(priority: impl Into<String>) -> Self {
        Self {
            priority: Some(priority.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// `GET /workorders/{id}` response body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderEnvelope {
    pub work_order: WorkOrderSnapshot,
}

/// `PATCH /workorders/{id}` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateUpdate {
    pub due_date: String,
}
