use tracing::trace;

use crate::models::appointment::Appointment;
use crate::models::party::Hour;
use crate::models::status::Status;
use crate::scheduler::Roster;
use crate::scheduler::slots::SlotBook;

/// Whether an assignment run tries to keep each appointment at its requested hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Assign the requested hour whenever it is still open.
    Honor,
    /// Ignore requested hours; every assignment takes the latest open hour.
    Ignore,
}

/// Engine working state for one appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub appointment: Appointment,
    /// Hour originally requested, kept across reassignments.
    pub original_time: Option<Hour>,
    pub solved: bool,
}

impl Ticket {
    pub fn new(appointment: Appointment) -> Self {
        Self {
            original_time: appointment.time,
            appointment,
            solved: false,
        }
    }
}

/// Resolves every ticket to an hour, or to `RED` when none is left.
///
/// Each step serves the unsolved ticket with the most urgent status, then the
/// fewest open hours, then the earliest position in `tickets`. Once no unsolved
/// ticket has an open hour, all remaining ones are marked `RED`; their `time`
/// keeps its last value.
pub fn assign(tickets: &[Ticket], roster: &Roster, preference: Preference) -> Vec<Ticket> {
    let mut book = SlotBook::fresh(roster);
    let mut working: Vec<Ticket> = tickets
        .iter()
        .cloned()
        .map(|ticket| Ticket {
            solved: false,
            ..ticket
        })
        .collect();

    loop {
        let next = working
            .iter()
            .enumerate()
            .filter(|(_, ticket)| !ticket.solved)
            .filter_map(|(index, ticket)| {
                let candidates = book.candidates(&ticket.appointment);
                let latest = candidates.last().copied()?;
                Some((index, candidates, latest))
            })
            .min_by_key(|(index, candidates, _)| {
                (
                    working[*index].appointment.status.urgency(),
                    candidates.len(),
                    *index,
                )
            });

        let Some((index, candidates, latest)) = next else {
            for ticket in working.iter_mut().filter(|ticket| !ticket.solved) {
                ticket.appointment.status = Status::Red;
            }
            break;
        };

        let ticket = &mut working[index];
        let preferred = match preference {
            Preference::Honor => ticket
                .original_time
                .filter(|hour| candidates.contains(hour)),
            Preference::Ignore => None,
        };
        let (hour, status) = match preferred {
            Some(hour) => (hour, Status::Green),
            None => (latest, Status::Blue),
        };

        trace!(
            "Assigning patient={} doctor={} to {} as {}",
            ticket.appointment.id_patient, ticket.appointment.id_doctor, hour, status
        );

        ticket.appointment.time = Some(hour);
        ticket.appointment.status = status;
        ticket.solved = true;
        book.claim(&ticket.appointment, hour);
    }

    working
}
