use crate::models::DbAppointment;
use chrono::Utc;
use eyre::Result;
use medsync_core::models::appointment::Appointment;
use sqlx::{Executor, Pool, Postgres};

pub async fn create_appointment<'e, E>(executor: E, appointment: &Appointment) -> Result<DbAppointment>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id_patient, id_doctor, time, status, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, id_patient, id_doctor, time, status, created_at
        "#,
    )
    .bind(appointment.id_patient)
    .bind(appointment.id_doctor)
    .bind(appointment.time.map(i16::from))
    .bind(appointment.status.as_str())
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_appointments(pool: &Pool<Postgres>) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, id_patient, id_doctor, time, status, created_at
        FROM appointments
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Sets every appointment holding the patient or the doctor at `time` to YELLOW.
/// Returns the number of matching rows.
pub async fn mark_conflicts_yellow(
    pool: &Pool<Postgres>,
    id_patient: i64,
    id_doctor: i64,
    time: i16,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE appointments
        SET status = 'YELLOW'
        WHERE time = $3 AND (id_patient = $1 OR id_doctor = $2)
        "#,
    )
    .bind(id_patient)
    .bind(id_doctor)
    .bind(time)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn delete_appointments<'e, E>(executor: E) -> Result<u64>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM appointments")
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
