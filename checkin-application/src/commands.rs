pub mod attempt_commands;
pub mod checkin_commands;
pub mod checkout_commands;
pub mod pin_commands;
