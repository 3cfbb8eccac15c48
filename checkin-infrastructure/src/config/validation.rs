use anyhow::{anyhow, Result};

use checkin_domain::is_valid_registry_pin;

pub fn validate_event_id(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("event id is empty"));
    }
    if value.chars().any(char::is_control) {
        return Err(anyhow!("event id contains control characters"));
    }
    Ok(())
}

pub fn validate_registry_pin(event_id: &str, pin: &str) -> Result<()> {
    if !is_valid_registry_pin(pin) {
        return Err(anyhow!("pin for event '{}' must be 4-6 digits", event_id));
    }
    Ok(())
}
