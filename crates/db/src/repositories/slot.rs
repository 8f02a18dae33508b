use crate::models::DbSlot;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_slot(
    pool: &Pool<Postgres>,
    description: &str,
    category: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    participant_ids: &[Uuid],
) -> Result<DbSlot> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating slot: id={}, start={}, end={}, participants={}",
        id, start_time, end_time, participant_ids.len()
    );

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        INSERT INTO slots (id, description, category, start_time, end_time, participant_ids, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, description, category, start_time, end_time, participant_ids, created_at
        "#,
    )
    .bind(id)
    .bind(description)
    .bind(category)
    .bind(start_time)
    .bind(end_time)
    .bind(participant_ids)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(slot)
}

pub async fn get_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, description, category, start_time, end_time, participant_ids, created_at
        FROM slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if slot.is_none() {
        tracing::debug!("Slot not found: id={}", id);
    }

    Ok(slot)
}

pub async fn list_slots(pool: &Pool<Postgres>) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, description, category, start_time, end_time, participant_ids, created_at
        FROM slots
        ORDER BY start_time ASC, created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(slots)
}

pub async fn update_slot(
    pool: &Pool<Postgres>,
    id: Uuid,
    description: &str,
    category: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    participant_ids: &[Uuid],
) -> Result<Option<DbSlot>> {
    tracing::debug!("Updating slot: id={}, start={}, end={}", id, start_time, end_time);

    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        UPDATE slots
        SET description = $2, category = $3, start_time = $4, end_time = $5, participant_ids = $6
        WHERE id = $1
        RETURNING id, description, category, start_time, end_time, participant_ids, created_at
        "#,
    )
    .bind(id)
    .bind(description)
    .bind(category)
    .bind(start_time)
    .bind(end_time)
    .bind(participant_ids)
    .fetch_optional(pool)
    .await?;

    Ok(slot)
}

/// Returns whether a row was removed.
pub async fn delete_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// First slot sharing a participant with `participant_ids` whose range
/// overlaps `[start_time, end_time]` inclusively, ignoring `exclude_id`.
pub async fn find_conflicting_slot(
    pool: &Pool<Postgres>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    participant_ids: &[Uuid],
    exclude_id: Option<Uuid>,
) -> Result<Option<DbSlot>> {
    let slot = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, description, category, start_time, end_time, participant_ids, created_at
        FROM slots
        WHERE participant_ids && $3
          AND ($4::uuid IS NULL OR id <> $4)
          AND (
                (start_time <= $1 AND end_time >= $1)
             OR (start_time <= $2 AND end_time >= $2)
             OR (start_time >= $1 AND end_time <= $2)
          )
        LIMIT 1
        "#,
    )
    .bind(start_time)
    .bind(end_time)
    .bind(participant_ids)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;

    if let Some(s) = &slot {
        tracing::debug!("Conflicting slot found: id={}", s.id);
    }

    Ok(slot)
}
