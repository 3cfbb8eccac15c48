// Event check-in entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::{ApplicationId, CheckinStatus, EventId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCheckin {
    pub id: Uuid,
    pub user_id: UserId,
    pub event_id: EventId,
    pub application_id: ApplicationId,
    pub checkin_time: DateTime<Utc>,
    pub pin_used: String,
    pub status: CheckinStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_time: Option<DateTime<Utc>>,
}

impl EventCheckin {
    pub fn checked_in(
        user_id: UserId,
        event_id: EventId,
        pin_used: impl Into<String>,
        checkin_time: DateTime<Utc>,
    ) -> Self {
        let application_id = ApplicationId::derive(&event_id, &user_id);
        Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            application_id,
            checkin_time,
            pin_used: pin_used.into(),
            status: CheckinStatus::CheckedIn,
            checkout_time: None,
        }
    }

    pub fn key(&self) -> CheckinKey {
        CheckinKey::new(self.user_id.clone(), self.event_id.clone())
    }
}

/// Uniqueness key of a check-in: one record per user and event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckinKey {
    pub user_id: UserId,
    pub event_id: EventId,
}

impl CheckinKey {
    pub fn new(user_id: UserId, event_id: EventId) -> Self {
        Self { user_id, event_id }
    }
}

/// Result of a conditional insert into the check-in store.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Inserted(EventCheckin),
    AlreadyExists(EventCheckin),
}

#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    CheckedOut(EventCheckin),
    AlreadyCheckedOut(EventCheckin),
    NotFound,
}
