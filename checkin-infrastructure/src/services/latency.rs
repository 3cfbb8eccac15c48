use std::time::Duration;

use async_trait::async_trait;

use checkin_domain::Latency;

/// Simulated round trip to the verification backend.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    delay: Duration,
}

impl SimulatedLatency {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

#[async_trait]
impl Latency for SimulatedLatency {
    async fn round_trip(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
