pub mod appointments;
pub mod health;
pub mod parties;
pub mod socket;
