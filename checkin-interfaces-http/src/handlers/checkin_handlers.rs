use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use checkin_application::commands::{checkin_commands, checkout_commands};
use checkin_application::queries::checkin_queries;
use checkin_application::AppState;
use checkin_domain::{
    CheckinError, CheckinOutcome, CheckinRequest, CheckinStatusView, CheckoutRequest, EventId,
};

use crate::error::HttpError;
use crate::middleware::{authorize, resolve_identity};

#[derive(Deserialize)]
pub struct CheckinStatusQuery {
    pub event_id: EventId,
}

/// Every policy outcome is a 200 carrying `success` and a user-facing message,
/// including a body that cannot be read as a check-in request.
pub async fn submit_checkin(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CheckinRequest>, JsonRejection>,
) -> Result<Json<CheckinOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            debug!("unreadable check-in body: {}", rejection.body_text());
            let err = CheckinError::InvalidPinFormat;
            state.metrics.record_rejection(&err);
            return Ok(Json(CheckinOutcome::from(err)));
        }
    };
    let identity = resolve_identity(&headers);
    let outcome = checkin_commands::submit_checkin(&state, identity, payload).await;
    Ok(Json(outcome))
}

pub async fn submit_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<Json<CheckinOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let Json(payload) = payload.map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;
    let identity = resolve_identity(&headers);
    let outcome = checkout_commands::perform_checkout(&state, identity, &payload.event_id).await;
    Ok(Json(outcome))
}

pub async fn get_checkin_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CheckinStatusQuery>,
) -> Result<Json<CheckinStatusView>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let identity = resolve_identity(&headers);
    let status = checkin_queries::checkin_status(&state, identity, query.event_id).await?;
    Ok(Json(status))
}
