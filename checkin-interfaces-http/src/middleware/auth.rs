use axum::http::HeaderMap;

use checkin_domain::{RuntimeConfig, UserId};

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Service-level bearer token check. Open when no token is configured.
pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Identity resolved by the upstream auth layer; absent or blank means the
/// caller is anonymous.
pub fn resolve_identity(headers: &HeaderMap) -> Option<UserId> {
    let value = headers.get(USER_ID_HEADER)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(UserId::new(value))
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
