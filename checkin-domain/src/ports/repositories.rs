use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    AttemptFilter, CheckinAttempt, CheckinKey, CheckoutOutcome, EventCheckin, InsertOutcome,
};
use crate::value_objects::EventId;

/// Authoritative source of the current check-in PIN of each event.
#[async_trait]
pub trait PinRegistry: Send + Sync {
    async fn lookup_pin(&self, event_id: &EventId) -> anyhow::Result<Option<String>>;
    async fn set_pin(&self, event_id: &EventId, pin: &str) -> anyhow::Result<()>;
    async fn remove_pin(&self, event_id: &EventId) -> anyhow::Result<bool>;
    async fn event_count(&self) -> anyhow::Result<usize>;
}

/// Append-only audit trail of verification attempts.
#[async_trait]
pub trait AttemptLog: Send + Sync {
    async fn append(&self, attempt: &CheckinAttempt) -> anyhow::Result<()>;
    /// Newest first.
    async fn list(&self, filter: &AttemptFilter) -> anyhow::Result<Vec<CheckinAttempt>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait CheckinRepository: Send + Sync {
    /// Inserts `record` unless a record already exists for its key. The
    /// existence check and the insert happen atomically.
    async fn insert_if_absent(&self, record: EventCheckin) -> anyhow::Result<InsertOutcome>;
    async fn find(&self, key: &CheckinKey) -> anyhow::Result<Option<EventCheckin>>;
    /// Moves a `CheckedIn` record to `CheckedOut`; atomic like the insert.
    async fn mark_checked_out(
        &self,
        key: &CheckinKey,
        at: DateTime<Utc>,
    ) -> anyhow::Result<CheckoutOutcome>;
    async fn list_for_event(&self, event_id: &EventId) -> anyhow::Result<Vec<EventCheckin>>;
}
