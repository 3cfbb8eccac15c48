use std::sync::Arc;

use checkin_domain::ports::{
    AttemptLog, CheckinRepository, Clock, HealthCheckService, Latency, PinRegistry,
};
use checkin_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub pin_registry: Arc<dyn PinRegistry>,
    pub attempt_log: Arc<dyn AttemptLog>,
    pub checkin_repo: Arc<dyn CheckinRepository>,
    pub clock: Arc<dyn Clock>,
    pub latency: Arc<dyn Latency>,
    pub health: Arc<dyn HealthCheckService>,
    pub metrics: Arc<Metrics>,
}
