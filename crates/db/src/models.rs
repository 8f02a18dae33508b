use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use slotbook_core::models::{participant::Participant, slot::Slot};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbParticipant {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbParticipant> for Participant {
    fn from(row: DbParticipant) -> Self {
        Participant {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub participant_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<DbSlot> for Slot {
    fn from(row: DbSlot) -> Self {
        Slot {
            id: row.id,
            description: row.description,
            category: row.category,
            start_time: row.start_time,
            end_time: row.end_time,
            participants: row.participant_ids,
            created_at: row.created_at,
        }
    }
}
