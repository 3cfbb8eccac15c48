use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use checkin_domain::{
    CheckinKey, CheckinRepository, CheckinStatus, CheckoutOutcome, EventCheckin, EventId,
    InsertOutcome,
};

/// Check-in records keyed by (user, event). Every check-then-write runs
/// under a single write guard, so the key stays unique under concurrent
/// submissions.
#[derive(Default)]
pub struct InMemoryCheckinRepository {
    records: RwLock<HashMap<CheckinKey, EventCheckin>>,
}

impl InMemoryCheckinRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CheckinRepository for InMemoryCheckinRepository {
    async fn insert_if_absent(&self, record: EventCheckin) -> anyhow::Result<InsertOutcome> {
        use std::collections::hash_map::Entry;

        let mut records = self.records.write().await;
        match records.entry(record.key()) {
            Entry::Occupied(existing) => Ok(InsertOutcome::AlreadyExists(existing.get().clone())),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(InsertOutcome::Inserted(record))
            }
        }
    }

    async fn find(&self, key: &CheckinKey) -> anyhow::Result<Option<EventCheckin>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn mark_checked_out(
        &self,
        key: &CheckinKey,
        at: DateTime<Utc>,
    ) -> anyhow::Result<CheckoutOutcome> {
        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(key) else {
            return Ok(CheckoutOutcome::NotFound);
        };
        if record.status == CheckinStatus::CheckedOut {
            return Ok(CheckoutOutcome::AlreadyCheckedOut(record.clone()));
        }
        record.status = CheckinStatus::CheckedOut;
        record.checkout_time = Some(at);
        Ok(CheckoutOutcome::CheckedOut(record.clone()))
    }

    async fn list_for_event(&self, event_id: &EventId) -> anyhow::Result<Vec<EventCheckin>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|record| record.event_id == *event_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use checkin_domain::UserId;

    fn record(user: &str, event: &str) -> EventCheckin {
        EventCheckin::checked_in(UserId::new(user), EventId::new(event), "1234", Utc::now())
    }

    #[tokio::test]
    async fn second_insert_for_the_pair_keeps_the_first_record() {
        let repo = InMemoryCheckinRepository::new();
        let first = record("u", "1");
        let first_id = first.id;

        assert!(matches!(
            repo.insert_if_absent(first).await.expect("insert"),
            InsertOutcome::Inserted(_)
        ));
        match repo.insert_if_absent(record("u", "1")).await.expect("insert") {
            InsertOutcome::AlreadyExists(existing) => assert_eq!(existing.id, first_id),
            InsertOutcome::Inserted(_) => panic!("duplicate check-in inserted"),
        }
        assert_eq!(repo.list_for_event(&EventId::new("1")).await.expect("list").len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_inserts_create_one_record() {
        let repo = Arc::new(InMemoryCheckinRepository::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                matches!(
                    repo.insert_if_absent(record("u", "1")).await,
                    Ok(InsertOutcome::Inserted(_))
                )
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.expect("join") {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
    }

    #[tokio::test]
    async fn checkout_is_reported_per_state() {
        let repo = InMemoryCheckinRepository::new();
        let key = CheckinKey::new(UserId::new("u"), EventId::new("1"));
        let at = Utc::now();

        assert!(matches!(
            repo.mark_checked_out(&key, at).await.expect("checkout"),
            CheckoutOutcome::NotFound
        ));
        repo.insert_if_absent(record("u", "1")).await.expect("insert");
        assert!(matches!(
            repo.mark_checked_out(&key, at).await.expect("checkout"),
            CheckoutOutcome::CheckedOut(_)
        ));
        assert!(matches!(
            repo.mark_checked_out(&key, at).await.expect("checkout"),
            CheckoutOutcome::AlreadyCheckedOut(_)
        ));
    }
}
