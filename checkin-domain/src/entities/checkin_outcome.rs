// Caller-facing check-in DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CheckinError;
use crate::value_objects::EventId;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckinRequest {
    pub event_id: EventId,
    /// Display only.
    #[serde(default)]
    pub event_name: Option<String>,
    pub pin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub event_id: EventId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinOutcome {
    pub success: bool,
    pub message: String,
    /// The user can correct the input and submit again.
    #[serde(default)]
    pub retryable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_after_ms: Option<u64>,
}

pub const CHECKIN_SUCCESS_MESSAGE: &str = "Check-in realizado com sucesso!";
pub const CHECKOUT_SUCCESS_MESSAGE: &str = "Check-out realizado com sucesso!";

impl CheckinOutcome {
    pub fn checked_in(checkin_time: DateTime<Utc>, dismiss_after_ms: u64) -> Self {
        Self {
            success: true,
            message: CHECKIN_SUCCESS_MESSAGE.to_string(),
            retryable: false,
            checkin_time: Some(checkin_time),
            dismiss_after_ms: Some(dismiss_after_ms),
        }
    }

    pub fn checked_out(checkin_time: DateTime<Utc>) -> Self {
        Self {
            success: true,
            message: CHECKOUT_SUCCESS_MESSAGE.to_string(),
            retryable: false,
            checkin_time: Some(checkin_time),
            dismiss_after_ms: None,
        }
    }

    pub fn rejected(err: &CheckinError) -> Self {
        Self {
            success: false,
            message: err.user_message().to_string(),
            retryable: err.is_retryable(),
            checkin_time: None,
            dismiss_after_ms: None,
        }
    }
}

impl From<CheckinError> for CheckinOutcome {
    fn from(err: CheckinError) -> Self {
        CheckinOutcome::rejected(&err)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckinStatusView {
    pub event_id: EventId,
    pub checked_in: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetPinRequest {
    pub pin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPinView {
    pub event_id: EventId,
    pub pin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_carry_retryable_flag() {
        let mismatch = CheckinOutcome::from(CheckinError::PinMismatch);
        assert!(!mismatch.success);
        assert!(mismatch.retryable);

        let duplicate = CheckinOutcome::from(CheckinError::AlreadyCheckedIn);
        assert!(!duplicate.retryable);
        assert_eq!(duplicate.message, "Você já fez check-in neste evento.");
    }

    #[test]
    fn successes_are_not_retryable() {
        let outcome = CheckinOutcome::checked_in(Utc::now(), 2000);
        assert!(outcome.success);
        assert!(!outcome.retryable);
        assert_eq!(outcome.dismiss_after_ms, Some(2000));
    }
}
