use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{ClinicError, ClinicResult};

pub type PartyId = i64;

/// A whole bookable hour of the day, `0..=23`.
pub type Hour = u8;

pub const HOURS_PER_DAY: i64 = 24;

/// Half-open daily window `[from, to)` during which a party can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Availability {
    pub from: Hour,
    pub to: Hour,
}

impl Availability {
    /// Builds a window, rejecting anything outside `0 <= from < to <= 24`.
    pub fn new(from: i64, to: i64) -> ClinicResult<Self> {
        if from < 0 || to > HOURS_PER_DAY || from >= to {
            return Err(ClinicError::Validation(format!(
                "Availability window [{}, {}) must satisfy 0 <= from < to <= 24",
                from, to
            )));
        }

        Ok(Self {
            from: from as Hour,
            to: to as Hour,
        })
    }

    pub fn contains(&self, hour: Hour) -> bool {
        self.from <= hour && hour < self.to
    }

    /// Every hour of the window in ascending order.
    pub fn hours(&self) -> Range<Hour> {
        self.from..self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartyKind {
    Doctor,
    Patient,
}

impl PartyKind {
    /// Plural name, used as the field of bulk registration responses.
    pub fn plural(self) -> &'static str {
        match self {
            PartyKind::Doctor => "doctors",
            PartyKind::Patient => "patients",
        }
    }
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartyKind::Doctor => f.write_str("Doctor"),
            PartyKind::Patient => f.write_str("Patient"),
        }
    }
}

/// A doctor or a patient. Both share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    #[serde(rename = "time")]
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRequest {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePartyRequest {
    pub id: i64,
    pub time: WindowRequest,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z][a-z]*(\s[A-Z][a-z]*)?$").expect("name pattern is a valid regex")
    })
}

impl CreatePartyRequest {
    pub fn validate(&self) -> ClinicResult<Party> {
        if self.id < 0 {
            return Err(ClinicError::Validation("id must not be negative".to_string()));
        }

        let availability = Availability::new(self.time.from, self.time.to)?;

        if let Some(name) = &self.name {
            if !name_pattern().is_match(name) {
                return Err(ClinicError::Validation(format!("Invalid name: {}", name)));
            }
        }

        Ok(Party {
            id: self.id,
            availability,
            name: self.name.clone(),
            birthday: self.birthday,
        })
    }
}
