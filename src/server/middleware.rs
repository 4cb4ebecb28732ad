use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::AppState;
use crate::webhook::SIGNATURE_HEADER;

/// Largest webhook body accepted
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Signature verification middleware.
///
/// Buffers the body, checks it against the signature header and hands the
/// same bytes on to the handler.
pub async fn signature_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

    let signature = parts
        .headers
        .get(SIGNATURE_HEADER)
        .and_then(|h| h.to_str().ok());
    let raw_body = (!bytes.is_empty()).then_some(&bytes[..]);

    if !state.verifier.verify(signature, raw_body) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
