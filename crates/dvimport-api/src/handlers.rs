//! API Handlers
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dvimport_core::{ErrorBody, MatchBody, MetadataFetcher, VerificationOutcome, VerifyRequest};
use serde_json::{json, Value};
use std::sync::Arc;

/// Verifies imported metadata by comparing the source and destination records.
pub async fn verify<F: MetadataFetcher + 'static>(
    State(state): State<Arc<AppState<F>>>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };
    let outcome = state.verifier.verify(&request).await;
    state.metrics.record(&outcome);
    outcome_response(&outcome)
}

pub fn outcome_response(outcome: &VerificationOutcome) -> Response {
    if outcome.is_match() {
        return (
            StatusCode::OK,
            Json(MatchBody {
                message: outcome.message(),
            }),
        )
            .into_response();
    }
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            detail: outcome.message(),
        }),
    )
        .into_response()
}

/// Unreadable request bodies keep the `{detail}` error shape.
fn rejection_response(rejection: JsonRejection) -> Response {
    tracing::warn!(error = %rejection, "rejected verify request");
    (
        rejection.status(),
        Json(ErrorBody {
            detail: rejection.body_text(),
        }),
    )
        .into_response()
}

pub async fn version() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "version": crate::VERSION })))
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "ok", "version": crate::VERSION })))
}

pub async fn metrics<F: MetadataFetcher + 'static>(State(state): State<Arc<AppState<F>>>) -> Response {
    match state.metrics.encode() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "metrics encoding failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
