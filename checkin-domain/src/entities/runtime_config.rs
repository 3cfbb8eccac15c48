// Runtime configuration shared with the application layer

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub verification_delay_ms: u64,
    pub confirmation_dismiss_ms: u64,
    pub generated_pin_length: usize,
    pub attempt_log_path: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub pins: HashMap<String, String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            verification_delay_ms: 1000,
            confirmation_dismiss_ms: 2000,
            generated_pin_length: 4,
            attempt_log_path: None,
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 15,
            pins: HashMap::new(),
        }
    }
}
