// Domain entities
pub mod checkin_attempt;
pub mod checkin_outcome;
pub mod event_checkin;
pub mod runtime_config;

pub use checkin_attempt::*;
pub use checkin_outcome::*;
pub use event_checkin::*;
pub use runtime_config::*;
