//! # MedSync Core
//!
//! Domain types shared by every MedSync crate, the storage traits the service
//! layer talks to, and the scheduling engine that turns pending appointment
//! requests into a conflict-free daily schedule.

pub mod errors;
pub mod models;
pub mod scheduler;
pub mod store;
