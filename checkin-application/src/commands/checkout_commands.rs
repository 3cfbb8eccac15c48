use tracing::{error, info};

use crate::AppState;
use checkin_domain::{
    CheckinError, CheckinKey, CheckinOutcome, CheckoutOutcome, EventCheckin, EventId, UserId,
};

/// Moves the caller's check-in for `event_id` to `CheckedOut`.
pub async fn perform_checkout(
    state: &AppState,
    identity: Option<UserId>,
    event_id: &EventId,
) -> CheckinOutcome {
    match record_checkout(state, identity, event_id).await {
        Ok(record) => {
            state.metrics.record_checkout();
            info!(
                event_id = %record.event_id,
                user_id = %record.user_id,
                "check-out recorded"
            );
            CheckinOutcome::checked_out(record.checkin_time)
        }
        Err(err) => {
            state.metrics.record_rejection(&err);
            if let CheckinError::Internal(cause) = &err {
                error!(event_id = %event_id, "check-out failed: {:#}", cause);
            }
            CheckinOutcome::from(err)
        }
    }
}

async fn record_checkout(
    state: &AppState,
    identity: Option<UserId>,
    event_id: &EventId,
) -> Result<EventCheckin, CheckinError> {
    let user_id = identity.ok_or(CheckinError::NotAuthenticated)?;
    let key = CheckinKey::new(user_id, event_id.clone());
    match state
        .checkin_repo
        .mark_checked_out(&key, state.clock.now())
        .await?
    {
        CheckoutOutcome::CheckedOut(record) => Ok(record),
        CheckoutOutcome::AlreadyCheckedOut(_) => Err(CheckinError::AlreadyCheckedOut),
        CheckoutOutcome::NotFound => Err(CheckinError::NotCheckedIn),
    }
}
