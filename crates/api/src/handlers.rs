pub mod appointments;
pub mod parties;
pub mod socket;
