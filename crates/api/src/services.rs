//! Request-independent collaborators shared through `ApiState`.

pub mod booking;
pub mod cache;
pub mod notifier;

pub use booking::BookingService;
pub use cache::ScheduleCache;
pub use notifier::Notifier;
