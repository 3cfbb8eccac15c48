use chrono::{DateTime, Utc};
use tracing::debug;

use crate::{AppError, AppState};
use checkin_domain::{CheckinKey, CheckinStatusView, EventCheckin, EventId, UserId};

pub async fn get_checkin(
    state: &AppState,
    user_id: &UserId,
    event_id: &EventId,
) -> Result<Option<EventCheckin>, AppError> {
    let key = CheckinKey::new(user_id.clone(), event_id.clone());
    Ok(state.checkin_repo.find(&key).await?)
}

pub async fn has_checked_in(
    state: &AppState,
    user_id: &UserId,
    event_id: &EventId,
) -> Result<bool, AppError> {
    Ok(get_checkin(state, user_id, event_id).await?.is_some())
}

pub async fn get_checkin_time(
    state: &AppState,
    user_id: &UserId,
    event_id: &EventId,
) -> Result<Option<DateTime<Utc>>, AppError> {
    Ok(get_checkin(state, user_id, event_id)
        .await?
        .map(|record| record.checkin_time))
}

/// Status of the caller's own check-in, as shown next to the event card.
pub async fn checkin_status(
    state: &AppState,
    identity: Option<UserId>,
    event_id: EventId,
) -> Result<CheckinStatusView, AppError> {
    let user_id = identity.ok_or(AppError::Unauthorized)?;
    let checkin_time = get_checkin_time(state, &user_id, &event_id).await?;
    debug!(event_id = %event_id, user_id = %user_id, "check-in status queried");
    Ok(CheckinStatusView {
        event_id,
        checked_in: checkin_time.is_some(),
        checkin_time,
    })
}

/// Producer roster, earliest arrival first.
pub async fn list_event_checkins(
    state: &AppState,
    event_id: &EventId,
) -> Result<Vec<EventCheckin>, AppError> {
    let mut records = state.checkin_repo.list_for_event(event_id).await?;
    records.sort_by(|a, b| {
        a.checkin_time
            .cmp(&b.checkin_time)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    Ok(records)
}
