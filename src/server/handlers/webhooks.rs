use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use super::ErrorResponse;
use crate::server::AppState;
use crate::webhook::WorkOrderEvent;

#[derive(Serialize)]
pub struct ReceivedResponse {
    pub received: bool,
}

/// Accept a verified work order event and process it in the background
pub async fn receive_work_order_event(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let event: WorkOrderEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed work order event");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(format!("Invalid event payload: {}", e))),
            )
                .into_response();
        }
    };

    tracing::info!(
        work_order_id = event.work_order_id,
        organization_id = ?event.organization_id,
        event_type = ?event.event_type,
        "Received work order event"
    );

    // Fire-and-forget; the sender only learns the event was accepted
    state.processor.spawn(event);

    Json(ReceivedResponse { received: true }).into_response()
}
