use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create doctors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id BIGINT PRIMARY KEY,
            available_from SMALLINT NOT NULL,
            available_to SMALLINT NOT NULL,
            name VARCHAR(255) NULL,
            birthday DATE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT doctor_window CHECK (available_from >= 0 AND available_from < available_to AND available_to <= 24)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create patients table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS patients (
            id BIGINT PRIMARY KEY,
            available_from SMALLINT NOT NULL,
            available_to SMALLINT NOT NULL,
            name VARCHAR(255) NULL,
            birthday DATE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT patient_window CHECK (available_from >= 0 AND available_from < available_to AND available_to <= 24)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. Party ids are not foreign keys: a request
    // without an hour is stored before its parties are looked up.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id BIGSERIAL PRIMARY KEY,
            id_patient BIGINT NOT NULL,
            id_doctor BIGINT NOT NULL,
            time SMALLINT NULL,
            status VARCHAR(16) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_hour CHECK (time IS NULL OR (time >= 0 AND time <= 23)),
            CONSTRAINT valid_status CHECK (status IN ('RED', 'YELLOW', 'BLUE', 'GREEN'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_appointments_patient_time ON appointments(id_patient, time);",
    )
    .execute(pool)
    .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_appointments_doctor_time ON appointments(id_doctor, time);",
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
