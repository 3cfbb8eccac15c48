use std::collections::HashMap;
use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use checkin_domain::RuntimeConfig;

use crate::config::validation::{validate_event_id, validate_registry_pin};
use crate::utils::{normalize_optional_text, resolve_path};

pub const CONFIG_ENV: &str = "CHECKIN_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub verification_delay_ms: u64,
    pub confirmation_dismiss_ms: u64,
    pub generated_pin_length: usize,
    pub attempt_log_path: Option<String>,
    pub log_dir: Option<String>,
    pub log_format: String,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    /// Event id to PIN, seeded into the registry at startup.
    pub pins: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            bind_addr: runtime.bind_addr,
            api_token: None,
            verification_delay_ms: runtime.verification_delay_ms,
            confirmation_dismiss_ms: runtime.confirmation_dismiss_ms,
            generated_pin_length: runtime.generated_pin_length,
            attempt_log_path: None,
            log_dir: None,
            log_format: "text".to_string(),
            max_body_bytes: runtime.max_body_bytes,
            request_timeout_seconds: runtime.request_timeout_seconds,
            pins: HashMap::new(),
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path, |key| env::var(key).ok()).await
    }

    pub async fn load_from(
        path: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file_path = Path::new(path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)
                .map_err(|err| anyhow!("invalid config {}: {}", path, err))?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_overrides(lookup);
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.api_token = normalize_optional_text(self.api_token.take());
        self.attempt_log_path = normalize_optional_text(self.attempt_log_path.take());
        self.log_dir = normalize_optional_text(self.log_dir.take());
        self.log_format = self.log_format.trim().to_lowercase();
        self.pins = std::mem::take(&mut self.pins)
            .into_iter()
            .map(|(event, pin)| (event.trim().to_string(), pin.trim().to_string()))
            .collect();
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        if let Some(path) = &self.attempt_log_path {
            self.attempt_log_path = Some(resolve_path(base, path));
        }
        if let Some(path) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, path));
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.verification_delay_ms >= self.request_timeout_seconds.saturating_mul(1000) {
            return Err(anyhow!(
                "verification_delay_ms ({}) must be shorter than request_timeout_seconds ({}s)",
                self.verification_delay_ms,
                self.request_timeout_seconds
            ));
        }
        if !(4..=6).contains(&self.generated_pin_length) {
            return Err(anyhow!("generated_pin_length must be between 4 and 6"));
        }
        if self.log_format != "text" && self.log_format != "json" {
            return Err(anyhow!(
                "log_format must be 'text' or 'json', got '{}'",
                self.log_format
            ));
        }
        for (event, pin) in &self.pins {
            validate_event_id(event)?;
            validate_registry_pin(event, pin)?;
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            verification_delay_ms: self.verification_delay_ms,
            confirmation_dismiss_ms: self.confirmation_dismiss_ms,
            generated_pin_length: self.generated_pin_length,
            attempt_log_path: self.attempt_log_path.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
            pins: self.pins.clone(),
        }
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("CHECKIN_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Some(value) = lookup("CHECKIN_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Some(value) = lookup("CHECKIN_VERIFICATION_DELAY_MS") {
            self.verification_delay_ms = value.parse().unwrap_or(self.verification_delay_ms);
        }
        if let Some(value) = lookup("CHECKIN_CONFIRMATION_DISMISS_MS") {
            self.confirmation_dismiss_ms = value.parse().unwrap_or(self.confirmation_dismiss_ms);
        }
        if let Some(value) = lookup("CHECKIN_GENERATED_PIN_LENGTH") {
            self.generated_pin_length = value.parse().unwrap_or(self.generated_pin_length);
        }
        if let Some(value) = lookup("CHECKIN_ATTEMPT_LOG_PATH") {
            self.attempt_log_path = Some(value);
        }
        if let Some(value) = lookup("CHECKIN_LOG_DIR") {
            self.log_dir = Some(value);
        }
        if let Some(value) = lookup("CHECKIN_LOG_FORMAT") {
            self.log_format = value;
        }
        if let Some(value) = lookup("CHECKIN_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Some(value) = lookup("CHECKIN_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Some(value) = lookup("CHECKIN_PINS") {
            self.pins.extend(parse_env_pins(&value));
        }
    }
}

/// `1=1234,2=5678`
fn parse_env_pins(value: &str) -> Vec<(String, String)> {
    value
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .map(|(event, pin)| (event.trim().to_string(), pin.trim().to_string()))
        .filter(|(event, pin)| !event.is_empty() && !pin.is_empty())
        .collect()
}
