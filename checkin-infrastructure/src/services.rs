pub mod clock;
pub mod health_service;
pub mod latency;

pub use clock::*;
pub use health_service::*;
pub use latency::*;
