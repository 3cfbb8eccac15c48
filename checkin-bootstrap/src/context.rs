use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use checkin_application::{AppState, Metrics};
use checkin_domain::AttemptLog;
use checkin_infrastructure::{
    AppConfig, DefaultHealthService, InMemoryAttemptLog, InMemoryCheckinRepository,
    InMemoryPinRegistry, JsonlAttemptLog, SimulatedLatency, SystemClock,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let pin_registry = Arc::new(InMemoryPinRegistry::seeded(&runtime_config.pins));
        info!(
            "pin registry seeded with {} events",
            runtime_config.pins.len()
        );

        let attempt_log: Arc<dyn AttemptLog> = match &runtime_config.attempt_log_path {
            Some(path) => Arc::new(JsonlAttemptLog::open(path).await?),
            None => {
                warn!("attempt_log_path not set, check-in attempts are kept in memory only");
                Arc::new(InMemoryAttemptLog::new())
            }
        };

        let state = AppState {
            latency: Arc::new(SimulatedLatency::from_millis(
                runtime_config.verification_delay_ms,
            )),
            config: runtime_config,
            pin_registry: pin_registry.clone(),
            attempt_log: attempt_log.clone(),
            checkin_repo: Arc::new(InMemoryCheckinRepository::new()),
            clock: Arc::new(SystemClock),
            health: Arc::new(DefaultHealthService::new(attempt_log, pin_registry)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
