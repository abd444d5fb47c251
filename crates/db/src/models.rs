use chrono::{DateTime, NaiveDate, Utc};
use medsync_core::errors::ClinicError;
use medsync_core::models::{
    appointment::Appointment,
    party::{Availability, HOURS_PER_DAY, Hour, Party},
    status::Status,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbParty {
    pub id: i64,
    pub available_from: i16,
    pub available_to: i16,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub id_patient: i64,
    pub id_doctor: i64,
    pub time: Option<i16>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbParty> for Party {
    type Error = ClinicError;

    fn try_from(row: DbParty) -> Result<Self, Self::Error> {
        Ok(Party {
            id: row.id,
            availability: Availability::new(
                i64::from(row.available_from),
                i64::from(row.available_to),
            )?,
            name: row.name,
            birthday: row.birthday,
        })
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = ClinicError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        let time = row
            .time
            .map(|hour| {
                Hour::try_from(hour)
                    .ok()
                    .filter(|hour| i64::from(*hour) < HOURS_PER_DAY)
                    .ok_or_else(|| {
                        ClinicError::Validation(format!(
                            "Stored appointment {} has invalid hour {}",
                            row.id, hour
                        ))
                    })
            })
            .transpose()?;

        Ok(Appointment {
            id_patient: row.id_patient,
            id_doctor: row.id_doctor,
            time,
            status: row.status.parse::<Status>()?,
        })
    }
}
