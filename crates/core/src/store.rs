//! Storage seams. The API talks to these traits only; `slotbook-db`
//! provides the Postgres and in-memory implementations.

use async_trait::async_trait;
use uuid::Uuid;

use crate::conflict::ConflictQuery;
use crate::errors::SchedulingResult;
use crate::models::participant::{NewParticipant, Participant};
use crate::models::slot::{Slot, SlotDetails, SlotFields};

#[async_trait]
pub trait ParticipantStore: Send + Sync {
    async fn add(&self, participant: NewParticipant) -> SchedulingResult<Participant>;

    async fn list_all(&self) -> SchedulingResult<Vec<Participant>>;

    /// Returns the participants that exist among `ids`. Unknown ids are
    /// left out rather than reported.
    async fn get_by_ids(&self, ids: &[Uuid]) -> SchedulingResult<Vec<Participant>>;
}

/// Slot persistence. A missing id is `Ok(None)` / `Ok(false)`, never an
/// error. Listings are ordered by start time.
#[async_trait]
pub trait SlotStore: Send + Sync {
    async fn create(&self, fields: SlotFields) -> SchedulingResult<Slot>;

    async fn get_by_id(&self, id: Uuid) -> SchedulingResult<Option<Slot>>;

    async fn get_with_participants(&self, id: Uuid) -> SchedulingResult<Option<SlotDetails>>;

    async fn list_all(&self) -> SchedulingResult<Vec<Slot>>;

    async fn list_all_with_participants(&self) -> SchedulingResult<Vec<SlotDetails>>;

    async fn update_by_id(&self, id: Uuid, fields: SlotFields) -> SchedulingResult<Option<Slot>>;

    async fn delete_by_id(&self, id: Uuid) -> SchedulingResult<bool>;

    /// First slot matching `query`, if any.
    async fn find_conflict(&self, query: &ConflictQuery) -> SchedulingResult<Option<Slot>>;
}
