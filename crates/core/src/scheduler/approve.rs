use crate::models::appointment::Appointment;
use crate::scheduler::search::sort_schedule;

/// Maps a resolved schedule to the records an approval commits:
/// `BLUE`, `GREEN` and `YELLOW` become `GREEN`, `RED` stays `RED`.
pub fn approve_schedule(resolved: &[Appointment]) -> Vec<Appointment> {
    resolved
        .iter()
        .map(|appointment| Appointment {
            status: appointment.status.approved(),
            ..appointment.clone()
        })
        .collect()
}

/// Whether committing `approved` would change the stored set. Order is ignored.
pub fn requires_commit(stored: &[Appointment], approved: &[Appointment]) -> bool {
    if stored.len() != approved.len() {
        return true;
    }

    let mut stored = stored.to_vec();
    let mut approved = approved.to_vec();
    sort_schedule(&mut stored);
    sort_schedule(&mut approved);

    stored != approved
}
