use anyhow::anyhow;
use tracing::{error, info, warn};

use crate::commands::attempt_commands;
use crate::commands::pin_commands::normalize_event_id;
use crate::AppState;
use checkin_domain::{
    sanitize_pin_input, validate_pin_format, CheckinError, CheckinOutcome, CheckinRequest,
    EventCheckin, EventId, InsertOutcome, UserId,
};

/// Entry point for a check-in submitted from the PIN dialog.
///
/// Normalizes the event id and the typed PIN and rejects malformed ones
/// before anything is verified or logged, then hands over to
/// [`perform_checkin`].
pub async fn submit_checkin(
    state: &AppState,
    identity: Option<UserId>,
    request: CheckinRequest,
) -> CheckinOutcome {
    let Ok(event_id) = normalize_event_id(request.event_id) else {
        let err = CheckinError::InvalidEvent;
        state.metrics.record_rejection(&err);
        return CheckinOutcome::from(err);
    };
    let pin = sanitize_pin_input(&request.pin);
    if let Err(err) = validate_pin_format(&pin) {
        state.metrics.record_rejection(&err);
        return CheckinOutcome::from(err);
    }
    perform_checkin(state, identity, &event_id, &pin).await
}

/// Verifies `pin` for `event_id` and records the check-in on a match.
///
/// The verification runs on its own task. A caller that stops waiting
/// does not cancel it, so the attempt is still logged once it resolves.
pub async fn perform_checkin(
    state: &AppState,
    identity: Option<UserId>,
    event_id: &EventId,
    pin: &str,
) -> CheckinOutcome {
    let task = tokio::spawn(record_checkin(
        state.clone(),
        identity,
        event_id.clone(),
        pin.to_string(),
    ));
    let result = match task.await {
        Ok(result) => result,
        Err(err) => Err(CheckinError::Internal(anyhow!(
            "check-in task aborted: {}",
            err
        ))),
    };

    match result {
        Ok(record) => {
            state.metrics.record_checkin();
            info!(
                event_id = %record.event_id,
                user_id = %record.user_id,
                checkin_id = %record.id,
                "check-in recorded"
            );
            CheckinOutcome::checked_in(record.checkin_time, state.config.confirmation_dismiss_ms)
        }
        Err(err) => {
            state.metrics.record_rejection(&err);
            match &err {
                CheckinError::Internal(cause) => {
                    error!(event_id = %event_id, "check-in failed: {:#}", cause)
                }
                CheckinError::PinMismatch => warn!(event_id = %event_id, "check-in pin mismatch"),
                other => info!(event_id = %event_id, "check-in rejected: {}", other),
            }
            CheckinOutcome::from(err)
        }
    }
}

async fn record_checkin(
    state: AppState,
    identity: Option<UserId>,
    event_id: EventId,
    pin: String,
) -> Result<EventCheckin, CheckinError> {
    let user_id = identity.ok_or(CheckinError::NotAuthenticated)?;

    state.latency.round_trip().await;

    let registered = state.pin_registry.lookup_pin(&event_id).await;
    let matched = matches!(&registered, Ok(Some(expected)) if *expected == pin);
    let now = state.clock.now();

    // Logged before acting on the comparison.
    attempt_commands::log_attempt(&state, &user_id, &event_id, &pin, matched, now).await;

    if let Err(err) = registered {
        return Err(CheckinError::Internal(err));
    }
    if !matched {
        return Err(CheckinError::PinMismatch);
    }

    let record = EventCheckin::checked_in(user_id, event_id, &pin, now);
    match state.checkin_repo.insert_if_absent(record).await? {
        InsertOutcome::Inserted(record) => Ok(record),
        InsertOutcome::AlreadyExists(_) => Err(CheckinError::AlreadyCheckedIn),
    }
}
