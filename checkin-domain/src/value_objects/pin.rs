// Check-in PIN policy

use crate::error::CheckinError;

pub const MIN_PIN_LEN: usize = 4;
pub const MAX_PIN_LEN: usize = 6;

/// Keeps only ASCII digits and truncates to [`MAX_PIN_LEN`], the way the
/// PIN entry field filters keystrokes.
pub fn sanitize_pin_input(raw: &str) -> String {
    raw.chars()
        .filter(|ch| ch.is_ascii_digit())
        .take(MAX_PIN_LEN)
        .collect()
}

/// Guard applied before a submission reaches the recorder.
pub fn validate_pin_format(pin: &str) -> Result<(), CheckinError> {
    if pin.chars().count() < MIN_PIN_LEN {
        return Err(CheckinError::InvalidPinFormat);
    }
    Ok(())
}

/// Stricter check for PINs an organizer registers: 4 to 6 digits, nothing else.
pub fn is_valid_registry_pin(pin: &str) -> bool {
    let len = pin.len();
    (MIN_PIN_LEN..=MAX_PIN_LEN).contains(&len) && pin.chars().all(|ch| ch.is_ascii_digit())
}
