pub mod attempt_queries;
pub mod checkin_queries;
