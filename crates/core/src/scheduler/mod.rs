//! # Scheduling engine
//!
//! Turns the pending appointment set and the availability of every doctor and
//! patient into a schedule in which no doctor and no patient is booked twice
//! for the same hour.
//!
//! The pieces, from the bottom up:
//!
//! - [`slots`]: per-run sets of claimable hours built from availability windows
//! - [`classify`]: the eager status seeded when an appointment is created
//! - [`assign`]: the greedy most-constrained-first assignment pass
//! - [`score`]: a total order over candidate schedules
//! - [`search`]: the local search that alternates preference modes until stable
//! - [`approve`]: the status mapping applied before a schedule is committed
//!
//! Everything except [`classify`] is synchronous and works on an in-memory
//! snapshot; nothing here writes to storage.

pub mod approve;
pub mod assign;
pub mod classify;
pub mod score;
pub mod search;
pub mod slots;

use std::collections::HashMap;

use crate::models::party::{Availability, Party, PartyId, PartyKind};

pub use approve::{approve_schedule, requires_commit};
pub use assign::{Preference, Ticket, assign};
pub use classify::classify;
pub use score::Score;
pub use search::{
    SearchConfig, SearchOutcome, check_equal, is_feasible, optimize, sort_schedule,
};
pub use slots::{SlotBook, build_slots};

/// Availability of every party referenced by a recomputation, keyed by id.
///
/// Built once per recomputation and never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    doctors: HashMap<PartyId, Availability>,
    patients: HashMap<PartyId, Availability>,
}

impl Roster {
    pub fn new(
        doctors: impl IntoIterator<Item = Party>,
        patients: impl IntoIterator<Item = Party>,
    ) -> Self {
        Self {
            doctors: doctors.into_iter().map(|p| (p.id, p.availability)).collect(),
            patients: patients.into_iter().map(|p| (p.id, p.availability)).collect(),
        }
    }

    pub fn with(mut self, kind: PartyKind, id: PartyId, availability: Availability) -> Self {
        self.insert(kind, id, availability);
        self
    }

    pub fn insert(&mut self, kind: PartyKind, id: PartyId, availability: Availability) {
        match kind {
            PartyKind::Doctor => self.doctors.insert(id, availability),
            PartyKind::Patient => self.patients.insert(id, availability),
        };
    }

    pub fn window(&self, kind: PartyKind, id: PartyId) -> Option<Availability> {
        match kind {
            PartyKind::Doctor => self.doctors.get(&id).copied(),
            PartyKind::Patient => self.patients.get(&id).copied(),
        }
    }

    pub fn doctors(&self) -> impl Iterator<Item = (PartyId, Availability)> + '_ {
        self.doctors.iter().map(|(id, window)| (*id, *window))
    }

    pub fn patients(&self) -> impl Iterator<Item = (PartyId, Availability)> + '_ {
        self.patients.iter().map(|(id, window)| (*id, *window))
    }
}
