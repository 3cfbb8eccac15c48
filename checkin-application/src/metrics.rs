use std::sync::atomic::{AtomicU64, Ordering};

use checkin_domain::CheckinError;

#[derive(Debug, Default)]
pub struct Metrics {
    attempts: AtomicU64,
    attempt_log_failures: AtomicU64,
    checkins: AtomicU64,
    checkouts: AtomicU64,
    pin_mismatches: AtomicU64,
    already_checked_in: AtomicU64,
    not_authenticated: AtomicU64,
    invalid_format: AtomicU64,
    internal_errors: AtomicU64,
}

impl Metrics {
    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_attempt_log_failure(&self) {
        self.attempt_log_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_checkin(&self) {
        self.checkins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_checkout(&self) {
        self.checkouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self, err: &CheckinError) {
        let counter = match err {
            CheckinError::PinMismatch => &self.pin_mismatches,
            CheckinError::AlreadyCheckedIn => &self.already_checked_in,
            CheckinError::NotAuthenticated => &self.not_authenticated,
            CheckinError::InvalidEvent | CheckinError::InvalidPinFormat => &self.invalid_format,
            CheckinError::Internal(_) => &self.internal_errors,
            CheckinError::NotCheckedIn | CheckinError::AlreadyCheckedOut => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn checkins(&self) -> u64 {
        self.checkins.load(Ordering::Relaxed)
    }

    pub fn attempt_log_failures(&self) -> u64 {
        self.attempt_log_failures.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let counters = [
            ("checkin_attempts_total", &self.attempts),
            ("checkin_attempt_log_failures_total", &self.attempt_log_failures),
            ("checkin_success_total", &self.checkins),
            ("checkin_checkouts_total", &self.checkouts),
            ("checkin_pin_mismatch_total", &self.pin_mismatches),
            ("checkin_already_checked_in_total", &self.already_checked_in),
            ("checkin_not_authenticated_total", &self.not_authenticated),
            ("checkin_invalid_format_total", &self.invalid_format),
            ("checkin_internal_errors_total", &self.internal_errors),
        ];

        let mut out = String::new();
        for (name, value) in counters {
            out.push_str(&format!(
                "# TYPE {name} counter\n{name} {}\n",
                value.load(Ordering::Relaxed)
            ));
        }
        out
    }
}
