use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ClinicError;

/// Resolution quality of an appointment.
///
/// Variants are declared from least to most desirable, so the derived `Ord`
/// is the desirability order: `Red < Yellow < Blue < Green`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// No feasible hour, or requested hour outside a window.
    Red,
    /// Competing with another request for the same hour; never part of a converged result.
    Yellow,
    /// Assigned to a different hour than requested.
    Blue,
    /// Assigned at the requested hour.
    Green,
}

impl Status {
    /// Rank used by the assignment engine to pick the next appointment.
    /// Lower ranks are served first; `Blue` and `Green` share a rank.
    pub fn urgency(self) -> u8 {
        match self {
            Status::Red => 0,
            Status::Yellow => 1,
            Status::Blue | Status::Green => 2,
        }
    }

    /// Status an appointment carries once its schedule is approved.
    pub fn approved(self) -> Status {
        match self {
            Status::Blue | Status::Green | Status::Yellow => Status::Green,
            Status::Red => Status::Red,
        }
    }

    /// Whether the appointment holds a slot.
    pub fn is_resolved(self) -> bool {
        matches!(self, Status::Blue | Status::Green)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Red => "RED",
            Status::Yellow => "YELLOW",
            Status::Blue => "BLUE",
            Status::Green => "GREEN",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RED" => Ok(Status::Red),
            "YELLOW" => Ok(Status::Yellow),
            "BLUE" => Ok(Status::Blue),
            "GREEN" => Ok(Status::Green),
            other => Err(ClinicError::Validation(format!("Unknown status: {}", other))),
        }
    }
}
