pub mod appointment;
pub mod party;
pub mod status;
