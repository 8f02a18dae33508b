use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Index definitions, each a single statement.
pub const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_slots_participant_ids ON slots USING GIN (participant_ids)",
    "CREATE INDEX IF NOT EXISTS idx_slots_start_time ON slots(start_time)",
    "CREATE INDEX IF NOT EXISTS idx_slots_end_time ON slots(end_time)",
    "CREATE INDEX IF NOT EXISTS idx_participants_created_at ON participants(created_at)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create participants table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS participants (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            phone VARCHAR(64) NOT NULL DEFAULT '',
            email VARCHAR(255) NOT NULL DEFAULT '',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create slots table; participants are an ordered id array
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            description TEXT NOT NULL DEFAULT '',
            category VARCHAR(255) NOT NULL DEFAULT '',
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            participant_ids UUID[] NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time >= start_time),
            CONSTRAINT enough_participants CHECK (cardinality(participant_ids) >= 2)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes, one prepared statement each
    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
