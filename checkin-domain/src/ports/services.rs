use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Round trip to the verification backend. Production waits a configured
/// delay; tests use a zero-delay implementation.
#[async_trait]
pub trait Latency: Send + Sync {
    async fn round_trip(&self);
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_attempt_log(&self) -> anyhow::Result<bool>;
    async fn check_pin_registry(&self) -> anyhow::Result<bool>;
}
