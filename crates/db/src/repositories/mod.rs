pub mod appointment;
pub mod party;
