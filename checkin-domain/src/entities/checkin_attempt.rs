// Check-in attempt entity
// One audit row per PIN verification, whatever the outcome

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{EventId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinAttempt {
    pub id: Uuid,
    pub user_id: UserId,
    pub event_id: EventId,
    pub pin_attempted: String,
    pub success: bool,
    pub attempted_at: DateTime<Utc>,
}

impl CheckinAttempt {
    pub fn new(
        user_id: UserId,
        event_id: EventId,
        pin_attempted: impl Into<String>,
        success: bool,
        attempted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            pin_attempted: pin_attempted.into(),
            success,
            attempted_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttemptFilter {
    pub event_id: Option<EventId>,
    pub user_id: Option<UserId>,
    pub limit: Option<usize>,
}

impl AttemptFilter {
    pub fn matches(&self, attempt: &CheckinAttempt) -> bool {
        let by_event = self
            .event_id
            .as_ref()
            .map(|event| *event == attempt.event_id)
            .unwrap_or(true);
        let by_user = self
            .user_id
            .as_ref()
            .map(|user| *user == attempt.user_id)
            .unwrap_or(true);
        by_event && by_user
    }
}
