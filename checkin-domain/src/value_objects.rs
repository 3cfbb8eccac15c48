// Domain value objects
pub mod checkin_status;
pub mod identifiers;
pub mod pin;

pub use checkin_status::*;
pub use identifiers::*;
pub use pin::*;
