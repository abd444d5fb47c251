use std::cmp::Ordering;

use crate::models::appointment::Appointment;
use crate::models::status::Status;

/// Quality of a schedule of `n` appointments with `g` green, `b` blue and `r`
/// unresolved ones: `-(g + (b + r * n) * n)`.
///
/// Higher is better. `YELLOW` counts as unresolved since it holds no slot.
/// Equal values are ordered by fewer unresolved, then fewer blue appointments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub value: i64,
    pub unresolved: usize,
    pub blue: usize,
}

impl Score {
    pub fn of(schedule: &[Appointment]) -> Self {
        Self::from_statuses(schedule.iter().map(|appointment| appointment.status))
    }

    pub fn from_statuses(statuses: impl IntoIterator<Item = Status>) -> Self {
        let (mut green, mut blue, mut unresolved) = (0usize, 0usize, 0usize);
        for status in statuses {
            match status {
                Status::Green => green += 1,
                Status::Blue => blue += 1,
                Status::Red | Status::Yellow => unresolved += 1,
            }
        }

        let n = (green + blue + unresolved) as i64;
        let value = -(green as i64 + (blue as i64 + unresolved as i64 * n) * n);

        Self {
            value,
            unresolved,
            blue,
        }
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| other.unresolved.cmp(&self.unresolved))
            .then_with(|| other.blue.cmp(&self.blue))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_the_weighted_formula() {
        // n = 4, g = 1, b = 2, r = 1 -> -(1 + (2 + 4) * 4)
        let score =
            Score::from_statuses([Status::Green, Status::Blue, Status::Blue, Status::Red]);
        assert_eq!(score.value, -25);
    }

    #[test]
    fn one_red_outweighs_every_blue() {
        let blues = Score::from_statuses([Status::Blue; 5]);
        let one_red = Score::from_statuses([
            Status::Red,
            Status::Green,
            Status::Green,
            Status::Green,
            Status::Green,
        ]);
        assert!(blues > one_red);
    }

    #[test]
    fn ties_prefer_fewer_unresolved() {
        // With a single appointment a blue and a red share the same value.
        let blue = Score::from_statuses([Status::Blue]);
        let red = Score::from_statuses([Status::Red]);
        assert_eq!(blue.value, red.value);
        assert!(blue > red);
    }
}
