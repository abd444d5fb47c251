use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::appointment::Appointment;
use crate::models::party::{PartyId, PartyKind};
use crate::models::status::Status;
use crate::scheduler::Roster;
use crate::scheduler::assign::{Preference, Ticket, assign};
use crate::scheduler::score::Score;

pub const DEFAULT_MAX_ITERATIONS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Upper bound on local-search iterations. When reached, the best schedule
    /// seen so far is returned.
    pub max_iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Final schedule ordered by patient, doctor and hour.
    pub schedule: Vec<Appointment>,
    pub iterations: usize,
    pub converged: bool,
    /// Set when the input already scored at least as well as anything found.
    pub kept_input: bool,
}

fn count(schedule: &[Appointment], status: Status) -> usize {
    schedule.iter().filter(|a| a.status == status).count()
}

/// Convergence test between two successive schedules: the number of `RED`
/// appointments did not change and `current` holds no `YELLOW`.
pub fn check_equal(previous: &[Appointment], current: &[Appointment]) -> bool {
    count(previous, Status::Red) == count(current, Status::Red)
        && count(current, Status::Yellow) == 0
}

fn appointments(tickets: &[Ticket]) -> Vec<Appointment> {
    tickets.iter().map(|t| t.appointment.clone()).collect()
}

/// Turns `BLUE` back into `GREEN` wherever the assigned hour is the hour that
/// was requested in the first place.
fn reconcile(tickets: &mut [Ticket]) {
    for ticket in tickets.iter_mut() {
        if ticket.appointment.status == Status::Blue
            && ticket.appointment.time.is_some()
            && ticket.appointment.time == ticket.original_time
        {
            ticket.appointment.status = Status::Green;
        }
    }
}

/// Whether every resolved appointment of `schedule` holds an hour inside both
/// parties' windows, with no doctor or patient holding the same hour twice.
pub fn is_feasible(schedule: &[Appointment], roster: &Roster) -> bool {
    let mut doctor_hours = HashSet::new();
    let mut patient_hours = HashSet::new();

    schedule
        .iter()
        .filter(|a| a.status.is_resolved())
        .all(|a| {
            let Some(hour) = a.time else {
                return false;
            };
            let inside = |kind: PartyKind, id: PartyId| {
                roster
                    .window(kind, id)
                    .is_some_and(|window| window.contains(hour))
            };

            inside(PartyKind::Doctor, a.id_doctor)
                && inside(PartyKind::Patient, a.id_patient)
                && doctor_hours.insert((a.id_doctor, hour))
                && patient_hours.insert((a.id_patient, hour))
        })
}

/// Orders a schedule by patient, doctor and hour; unscheduled hours sort first.
pub fn sort_schedule(schedule: &mut [Appointment]) {
    schedule.sort_by_key(|a| (a.id_patient, a.id_doctor, a.time));
}

/// Runs the local search over `input`.
///
/// Every iteration assigns the working schedule twice, once honouring the
/// requested hours and once ignoring them, and carries the better-scoring
/// result forward (ties go to the honouring run). The loop stops as soon as
/// [`check_equal`] holds between two successive schedules, or after
/// `config.max_iterations`, in which case the best schedule seen is used.
///
/// The result is never worse than `input`: if `input` holds no `YELLOW` and
/// scores at least as well as the search result, it is returned unchanged.
/// An input that is not [feasible](is_feasible) is never kept.
pub fn optimize(input: &[Appointment], roster: &Roster, config: &SearchConfig) -> SearchOutcome {
    let mut working: Vec<Ticket> = input.iter().cloned().map(Ticket::new).collect();
    let mut best: Option<(Score, Vec<Ticket>)> = None;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;

        let honored = assign(&working, roster, Preference::Honor);
        let ignored = assign(&working, roster, Preference::Ignore);
        let honored_score = Score::of(&appointments(&honored));
        let ignored_score = Score::of(&appointments(&ignored));

        let (current, current_score) = if ignored_score > honored_score {
            (ignored, ignored_score)
        } else {
            (honored, honored_score)
        };

        debug!(
            "Search iteration {}: honored={} ignored={}",
            iterations, honored_score.value, ignored_score.value
        );

        if best.as_ref().is_none_or(|(score, _)| current_score > *score) {
            best = Some((current_score, current.clone()));
        }

        let stable = check_equal(&appointments(&working), &appointments(&current));
        working = current;
        if stable {
            converged = true;
            break;
        }
    }

    let mut chosen = if converged {
        working
    } else {
        warn!(
            "Schedule search stopped after {} iterations without converging",
            iterations
        );
        best.map(|(_, tickets)| tickets).unwrap_or(working)
    };
    reconcile(&mut chosen);

    let candidate = appointments(&chosen);
    let input_has_yellow = count(input, Status::Yellow) > 0;
    let input_competes = !input_has_yellow && Score::of(&candidate) <= Score::of(input);
    let kept_input = input_competes && is_feasible(input, roster);
    if input_competes && !kept_input {
        warn!("Stored schedule is not feasible, replacing it with the search result");
    }

    let mut schedule = if kept_input {
        input.to_vec()
    } else {
        candidate
    };
    sort_schedule(&mut schedule);

    SearchOutcome {
        schedule,
        iterations,
        converged,
        kept_input,
    }
}
