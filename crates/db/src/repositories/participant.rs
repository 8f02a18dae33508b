use crate::models::DbParticipant;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_participant(
    pool: &Pool<Postgres>,
    name: &str,
    phone: &str,
    email: &str,
) -> Result<DbParticipant> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating participant: id={}, name={}", id, name);

    let participant = sqlx::query_as::<_, DbParticipant>(
        r#"
        INSERT INTO participants (id, name, phone, email, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, phone, email, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(phone)
    .bind(email)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(participant)
}

pub async fn list_participants(pool: &Pool<Postgres>) -> Result<Vec<DbParticipant>> {
    let participants = sqlx::query_as::<_, DbParticipant>(
        r#"
        SELECT id, name, phone, email, created_at
        FROM participants
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(participants)
}

pub async fn get_participants_by_ids(
    pool: &Pool<Postgres>,
    ids: &[Uuid],
) -> Result<Vec<DbParticipant>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let participants = sqlx::query_as::<_, DbParticipant>(
        r#"
        SELECT id, name, phone, email, created_at
        FROM participants
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(participants)
}
