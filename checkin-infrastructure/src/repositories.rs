pub mod attempt_log;
pub mod checkin_store;
pub mod pin_registry;

pub use attempt_log::*;
pub use checkin_store::*;
pub use pin_registry::*;
