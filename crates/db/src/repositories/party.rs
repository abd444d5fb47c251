use crate::models::DbParty;
use chrono::Utc;
use eyre::Result;
use medsync_core::models::party::{Party, PartyKind};
use sqlx::{Pool, Postgres};

/// Doctors and patients share one row shape, each kind in its own table.
fn table(kind: PartyKind) -> &'static str {
    match kind {
        PartyKind::Doctor => "doctors",
        PartyKind::Patient => "patients",
    }
}

/// Inserts a party. Returns `None` when the id is already taken.
pub async fn create_party(
    pool: &Pool<Postgres>,
    kind: PartyKind,
    party: &Party,
) -> Result<Option<DbParty>> {
    tracing::debug!(
        "Creating {}: id={}, window=[{}, {})",
        kind, party.id, party.availability.from, party.availability.to
    );

    let row = sqlx::query_as::<_, DbParty>(&format!(
        r#"
        INSERT INTO {} (id, available_from, available_to, name, birthday, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO NOTHING
        RETURNING id, available_from, available_to, name, birthday, created_at
        "#,
        table(kind)
    ))
    .bind(party.id)
    .bind(i16::from(party.availability.from))
    .bind(i16::from(party.availability.to))
    .bind(party.name.as_deref())
    .bind(party.birthday)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    if row.is_none() {
        tracing::debug!("{} with id={} already exists", kind, party.id);
    }

    Ok(row)
}

pub async fn get_party_by_id(
    pool: &Pool<Postgres>,
    kind: PartyKind,
    id: i64,
) -> Result<Option<DbParty>> {
    let row = sqlx::query_as::<_, DbParty>(&format!(
        r#"
        SELECT id, available_from, available_to, name, birthday, created_at
        FROM {}
        WHERE id = $1
        "#,
        table(kind)
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_parties_by_ids(
    pool: &Pool<Postgres>,
    kind: PartyKind,
    ids: &[i64],
) -> Result<Vec<DbParty>> {
    let rows = sqlx::query_as::<_, DbParty>(&format!(
        r#"
        SELECT id, available_from, available_to, name, birthday, created_at
        FROM {}
        WHERE id = ANY($1)
        ORDER BY id ASC
        "#,
        table(kind)
    ))
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn delete_parties<'e, E>(executor: E, kind: PartyKind) -> Result<u64>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(&format!("DELETE FROM {}", table(kind)))
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}
