use std::sync::Arc;

use async_trait::async_trait;
use checkin_domain::ports::{AttemptLog, HealthCheckService, PinRegistry};

pub struct DefaultHealthService {
    attempt_log: Arc<dyn AttemptLog>,
    pin_registry: Arc<dyn PinRegistry>,
}

impl DefaultHealthService {
    pub fn new(attempt_log: Arc<dyn AttemptLog>, pin_registry: Arc<dyn PinRegistry>) -> Self {
        Self {
            attempt_log,
            pin_registry,
        }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_attempt_log(&self) -> anyhow::Result<bool> {
        self.attempt_log.ping().await.map(|_| true)
    }

    async fn check_pin_registry(&self) -> anyhow::Result<bool> {
        self.pin_registry.event_count().await.map(|_| true)
    }
}
