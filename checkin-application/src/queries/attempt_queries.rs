use crate::{AppError, AppState};
use checkin_domain::{AttemptFilter, CheckinAttempt};

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

/// Audit view of verification attempts, newest first.
pub async fn list_attempts(
    state: &AppState,
    mut filter: AttemptFilter,
) -> Result<Vec<CheckinAttempt>, AppError> {
    filter.limit = Some(filter.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT));
    Ok(state.attempt_log.list(&filter).await?)
}
