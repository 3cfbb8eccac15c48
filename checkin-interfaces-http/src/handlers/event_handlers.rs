use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use checkin_application::commands::pin_commands;
use checkin_application::queries::{attempt_queries, checkin_queries};
use checkin_application::AppState;
use checkin_domain::{
    AttemptFilter, CheckinAttempt, EventCheckin, EventId, EventPinView, SetPinRequest, UserId,
};

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(Deserialize)]
pub struct AttemptQuery {
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

pub async fn list_event_checkins(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<EventCheckin>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let roster = checkin_queries::list_event_checkins(&state, &EventId::new(event_id)).await?;
    Ok(Json(roster))
}

pub async fn list_event_attempts(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Query(query): Query<AttemptQuery>,
) -> Result<Json<Vec<CheckinAttempt>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let filter = AttemptFilter {
        event_id: Some(EventId::new(event_id)),
        user_id: query
            .user_id
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(UserId::new),
        limit: query.limit,
    };
    let attempts = attempt_queries::list_attempts(&state, filter).await?;
    Ok(Json(attempts))
}

pub async fn set_event_pin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
    Json(payload): Json<SetPinRequest>,
) -> Result<Json<EventPinView>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let view = pin_commands::set_event_pin(&state, EventId::new(event_id), payload).await?;
    Ok(Json(view))
}

pub async fn regenerate_event_pin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<Json<EventPinView>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let view = pin_commands::regenerate_event_pin(&state, EventId::new(event_id)).await?;
    Ok(Json(view))
}

pub async fn remove_event_pin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(event_id): Path<String>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    pin_commands::remove_event_pin(&state, EventId::new(event_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
