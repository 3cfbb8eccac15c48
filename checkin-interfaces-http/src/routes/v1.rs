use axum::routing::{get, post, put};
use axum::Router;

use checkin_application::AppState;

use crate::handlers::{checkin_handlers, event_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/checkins", post(checkin_handlers::submit_checkin))
        .route(
            "/v1/checkins/checkout",
            post(checkin_handlers::submit_checkout),
        )
        .route(
            "/v1/checkins/status",
            get(checkin_handlers::get_checkin_status),
        )
        .route(
            "/v1/events/:event_id/checkins",
            get(event_handlers::list_event_checkins),
        )
        .route(
            "/v1/events/:event_id/attempts",
            get(event_handlers::list_event_attempts),
        )
        .route(
            "/v1/events/:event_id/pin",
            put(event_handlers::set_event_pin).delete(event_handlers::remove_event_pin),
        )
        .route(
            "/v1/events/:event_id/pin/regenerate",
            post(event_handlers::regenerate_event_pin),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
