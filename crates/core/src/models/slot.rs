use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::conflict::TimeRange;
use crate::models::participant::Participant;
use crate::time::display_utc;

/// A stored interview slot. Participants are kept as references in the
/// order they were submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub participants: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Slot {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }
}

/// Validated field set written by create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFields {
    pub description: String,
    pub category: String,
    pub range: TimeRange,
    pub participants: Vec<Uuid>,
}

/// A slot with its participant references resolved to full records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDetails {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
}

impl SlotDetails {
    /// Resolves `slot.participants` against `directory`, keeping reference
    /// order. References with no matching participant are dropped.
    pub fn resolve(slot: Slot, directory: &HashMap<Uuid, Participant>) -> Self {
        let participants = slot
            .participants
            .iter()
            .filter_map(|id| directory.get(id).cloned())
            .collect();

        Self {
            id: slot.id,
            description: slot.description,
            category: slot.category,
            start_time: slot.start_time,
            end_time: slot.end_time,
            participants,
            created_at: slot.created_at,
        }
    }
}

/// Body of `POST /create-list` and `PUT /edit-list/:id`.
///
/// Times are wall-clock strings interpreted under the configured input
/// offset. `pid` accepts either a single id or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, deserialize_with = "one_or_many")]
    pub pid: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotInfoResponse {
    pub data: Option<SlotDetails>,
}

/// Presentation copy of a slot with times rendered as UTC strings.
/// Stored values are never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotDisplay {
    pub id: Uuid,
    pub description: String,
    pub category: String,
    pub start_time: String,
    pub end_time: String,
    pub participants: Vec<Participant>,
}

impl From<&SlotDetails> for SlotDisplay {
    fn from(slot: &SlotDetails) -> Self {
        Self {
            id: slot.id,
            description: slot.description.clone(),
            category: slot.category.clone(),
            start_time: display_utc(&slot.start_time),
            end_time: display_utc(&slot.end_time),
            participants: slot.participants.clone(),
        }
    }
}
