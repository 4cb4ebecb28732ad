use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::WorkOrderSnapshot;

/// Inbound work-order change notification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderEvent {
    /// Work order the event refers to
    pub work_order_id: u64,
    /// Owning organization
    #[serde(default, alias = "orgId", skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<u64>,
    /// When the change happened on the remote side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<DateTime<Utc>>,
    /// Event variant, when the sender includes it
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Embedded snapshot; only some event variants carry one
    #[serde(
        default,
        rename = "workOrder",
        alias = "newWorkOrder",
        alias = "workOrderSnapshot",
        skip_serializing_if = "Option::is_none"
    )]
    pub work_order: Option<WorkOrderSnapshot>,
}

impl WorkOrderEvent {
    pub fn new(work_order_id: u64) -> Self {
        Self {
            work_order_id,
            organization_id: None,
            occurred_at: None,
            event_type: None,
            work_order: None,
        }
    }

    pub fn with_snapshot(mut self, snapshot: WorkOrderSnapshot) -> Self {
        self.work_order = Some(snapshot);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_with_embedded_snapshot() {
        let event: WorkOrderEvent = serde_json::from_str(
            r#"{
                "workOrderId": 101,
                "orgId": 7,
                "occurredAt": "2024-06-15T11:59:30.000Z",
                "newWorkOrder": {"priority": "HIGH", "title": "Leaking valve"}
            }"#,
        )
        .unwrap();

        assert_eq!(event.work_order_id, 101);
        assert_eq!(event.organization_id, Some(7));
        assert!(event.occurred_at.is_some());
        let snapshot = event.work_order.unwrap();
        assert_eq!(snapshot.priority.as_deref(), Some("HIGH"));
    }

    #[test]
    fn test_parse_event_without_snapshot() {
        let event: WorkOrderEvent =
            serde_json::from_str(r#"{"workOrderId": 5, "organizationId": 9}"#).unwrap();
        assert_eq!(event.organization_id, Some(9));
        assert!(event.work_order.is_none());
    }

    #[test]
    fn test_work_order_id_is_required() {
        assert!(serde_json::from_str::<WorkOrderEvent>(r#"{"orgId": 9}"#).is_err());
    }
}
