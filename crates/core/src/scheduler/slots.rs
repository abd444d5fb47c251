use std::collections::{BTreeSet, HashMap};

use crate::models::appointment::Appointment;
use crate::models::party::{Availability, Hour, PartyId};
use crate::scheduler::Roster;

/// Every hour of `window`, ascending.
pub fn build_slots(window: Availability) -> BTreeSet<Hour> {
    window.hours().collect()
}

/// Hours still unclaimed during one assignment run.
///
/// A book is built fresh from the roster at the start of every run and
/// dropped at the end of it, so claims never leak between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotBook {
    doctors: HashMap<PartyId, BTreeSet<Hour>>,
    patients: HashMap<PartyId, BTreeSet<Hour>>,
}

impl SlotBook {
    pub fn fresh(roster: &Roster) -> Self {
        Self {
            doctors: roster
                .doctors()
                .map(|(id, window)| (id, build_slots(window)))
                .collect(),
            patients: roster
                .patients()
                .map(|(id, window)| (id, build_slots(window)))
                .collect(),
        }
    }

    /// Hours open for both the doctor and the patient of `appointment`, ascending.
    /// Empty when either party is unknown.
    pub fn candidates(&self, appointment: &Appointment) -> Vec<Hour> {
        match (
            self.doctors.get(&appointment.id_doctor),
            self.patients.get(&appointment.id_patient),
        ) {
            (Some(doctor), Some(patient)) => doctor.intersection(patient).copied().collect(),
            _ => Vec::new(),
        }
    }

    pub fn claim(&mut self, appointment: &Appointment, hour: Hour) {
        if let Some(doctor) = self.doctors.get_mut(&appointment.id_doctor) {
            doctor.remove(&hour);
        }
        if let Some(patient) = self.patients.get_mut(&appointment.id_patient) {
            patient.remove(&hour);
        }
    }
}
