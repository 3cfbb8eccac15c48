use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use checkin_domain::{EventId, PinRegistry};

/// Process-wide PIN table, seeded from configuration at startup.
#[derive(Default)]
pub struct InMemoryPinRegistry {
    pins: RwLock<HashMap<EventId, String>>,
}

impl InMemoryPinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(pins: &HashMap<String, String>) -> Self {
        let pins = pins
            .iter()
            .map(|(event, pin)| (EventId::new(event.clone()), pin.clone()))
            .collect();
        Self {
            pins: RwLock::new(pins),
        }
    }
}

#[async_trait]
impl PinRegistry for InMemoryPinRegistry {
    async fn lookup_pin(&self, event_id: &EventId) -> anyhow::Result<Option<String>> {
        Ok(self.pins.read().await.get(event_id).cloned())
    }

    async fn set_pin(&self, event_id: &EventId, pin: &str) -> anyhow::Result<()> {
        self.pins
            .write()
            .await
            .insert(event_id.clone(), pin.to_string());
        Ok(())
    }

    async fn remove_pin(&self, event_id: &EventId) -> anyhow::Result<bool> {
        Ok(self.pins.write().await.remove(event_id).is_some())
    }

    async fn event_count(&self) -> anyhow::Result<usize> {
        Ok(self.pins.read().await.len())
    }
}
