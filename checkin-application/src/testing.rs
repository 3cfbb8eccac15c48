// In-process doubles for the domain ports

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Mutex;

use checkin_domain::{
    AttemptFilter, AttemptLog, CheckinAttempt, CheckinKey, CheckinRepository, CheckinStatus,
    CheckoutOutcome, Clock, EventCheckin, EventId, HealthCheckService, InsertOutcome, Latency,
    PinRegistry, RuntimeConfig,
};

use crate::{AppState, Metrics};

#[derive(Default)]
pub struct FakePinRegistry {
    pins: Mutex<HashMap<EventId, String>>,
}

#[async_trait]
impl PinRegistry for FakePinRegistry {
    async fn lookup_pin(&self, event_id: &EventId) -> anyhow::Result<Option<String>> {
        Ok(self.pins.lock().await.get(event_id).cloned())
    }

    async fn set_pin(&self, event_id: &EventId, pin: &str) -> anyhow::Result<()> {
        self.pins
            .lock()
            .await
            .insert(event_id.clone(), pin.to_string());
        Ok(())
    }

    async fn remove_pin(&self, event_id: &EventId) -> anyhow::Result<bool> {
        Ok(self.pins.lock().await.remove(event_id).is_some())
    }

    async fn event_count(&self) -> anyhow::Result<usize> {
        Ok(self.pins.lock().await.len())
    }
}

pub struct BrokenPinRegistry;

#[async_trait]
impl PinRegistry for BrokenPinRegistry {
    async fn lookup_pin(&self, _event_id: &EventId) -> anyhow::Result<Option<String>> {
        Err(anyhow!("secret store unreachable"))
    }

    async fn set_pin(&self, _event_id: &EventId, _pin: &str) -> anyhow::Result<()> {
        Err(anyhow!("secret store unreachable"))
    }

    async fn remove_pin(&self, _event_id: &EventId) -> anyhow::Result<bool> {
        Err(anyhow!("secret store unreachable"))
    }

    async fn event_count(&self) -> anyhow::Result<usize> {
        Err(anyhow!("secret store unreachable"))
    }
}

#[derive(Default)]
pub struct MemoryAttemptLog {
    attempts: Mutex<Vec<CheckinAttempt>>,
}

impl MemoryAttemptLog {
    pub async fn all(&self) -> Vec<CheckinAttempt> {
        self.attempts.lock().await.clone()
    }
}

#[async_trait]
impl AttemptLog for MemoryAttemptLog {
    async fn append(&self, attempt: &CheckinAttempt) -> anyhow::Result<()> {
        self.attempts.lock().await.push(attempt.clone());
        Ok(())
    }

    async fn list(&self, filter: &AttemptFilter) -> anyhow::Result<Vec<CheckinAttempt>> {
        let attempts = self.attempts.lock().await;
        let limit = filter.limit.unwrap_or(usize::MAX);
        Ok(attempts
            .iter()
            .rev()
            .filter(|attempt| filter.matches(attempt))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub struct FailingAttemptLog;

#[async_trait]
impl AttemptLog for FailingAttemptLog {
    async fn append(&self, _attempt: &CheckinAttempt) -> anyhow::Result<()> {
        Err(anyhow!("disk full"))
    }

    async fn list(&self, _filter: &AttemptFilter) -> anyhow::Result<Vec<CheckinAttempt>> {
        Err(anyhow!("disk full"))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Err(anyhow!("disk full"))
    }
}

#[derive(Default)]
pub struct MemoryCheckinRepository {
    records: Mutex<HashMap<CheckinKey, EventCheckin>>,
}

impl MemoryCheckinRepository {
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl CheckinRepository for MemoryCheckinRepository {
    async fn insert_if_absent(&self, record: EventCheckin) -> anyhow::Result<InsertOutcome> {
        let mut records = self.records.lock().await;
        if let Some(existing) = records.get(&record.key()) {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }
        records.insert(record.key(), record.clone());
        Ok(InsertOutcome::Inserted(record))
    }

    async fn find(&self, key: &CheckinKey) -> anyhow::Result<Option<EventCheckin>> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn mark_checked_out(
        &self,
        key: &CheckinKey,
        at: DateTime<Utc>,
    ) -> anyhow::Result<CheckoutOutcome> {
        let mut records = self.records.lock().await;
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
            .lock()
            .await
            .values()
            .filter(|record| record.event_id == *event_id)
            .cloned()
            .collect())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn round_trip(&self) {}
}

pub struct SlowLatency(pub Duration);

#[async_trait]
impl Latency for SlowLatency {
    async fn round_trip(&self) {
        tokio::time::sleep(self.0).await;
    }
}

pub struct AlwaysHealthy;

#[async_trait]
impl HealthCheckService for AlwaysHealthy {
    async fn check_attempt_log(&self) -> anyhow::Result<bool> {
        Ok(true)
    }

    async fn check_pin_registry(&self) -> anyhow::Result<bool> {
        Ok(true)
    }
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0)
        .single()
        .expect("valid fixed time")
}

pub struct Harness {
    pub state: AppState,
    pub attempts: Arc<MemoryAttemptLog>,
    pub checkins: Arc<MemoryCheckinRepository>,
}

pub async fn harness(pins: &[(&str, &str)]) -> Harness {
    let registry = Arc::new(FakePinRegistry::default());
    for (event, pin) in pins {
        registry
            .set_pin(&EventId::new(*event), pin)
            .await
            .expect("seed pin");
    }
    harness_with(registry, Arc::new(MemoryAttemptLog::default()))
}

pub fn harness_with(
    pin_registry: Arc<dyn PinRegistry>,
    attempts: Arc<MemoryAttemptLog>,
) -> Harness {
    let checkins = Arc::new(MemoryCheckinRepository::default());
    let state = AppState {
        config: RuntimeConfig::default(),
        pin_registry,
        attempt_log: attempts.clone(),
        checkin_repo: checkins.clone(),
        clock: Arc::new(FixedClock(fixed_time())),
        latency: Arc::new(NoLatency),
        health: Arc::new(AlwaysHealthy),
        metrics: Arc::new(Metrics::default()),
    };
    Harness {
        state,
        attempts,
        checkins,
    }
}
