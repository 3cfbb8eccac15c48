use chrono::{DateTime, Utc};
use tracing::warn;

use crate::AppState;
use checkin_domain::{CheckinAttempt, EventId, UserId};

/// Appends one attempt to the audit log and returns it.
///
/// A failing log store is reported and counted but never surfaced: the
/// check-in decision must not depend on whether the audit write succeeded.
pub async fn log_attempt(
    state: &AppState,
    user_id: &UserId,
    event_id: &EventId,
    pin_attempted: &str,
    success: bool,
    attempted_at: DateTime<Utc>,
) -> CheckinAttempt {
    let attempt = CheckinAttempt::new(
        user_id.clone(),
        event_id.clone(),
        pin_attempted,
        success,
        attempted_at,
    );
    state.metrics.record_attempt();
    if let Err(err) = state.attempt_log.append(&attempt).await {
        state.metrics.record_attempt_log_failure();
        warn!(
            attempt_id = %attempt.id,
            event_id = %event_id,
            user_id = %user_id,
            "failed to append check-in attempt: {:#}",
            err
        );
    }
    attempt
}
