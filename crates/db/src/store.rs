//! Postgres-backed implementation of the store traits.

use std::collections::HashMap;

use async_trait::async_trait;
use slotbook_core::{
    conflict::ConflictQuery,
    errors::SchedulingResult,
    models::{
        participant::{NewParticipant, Participant},
        slot::{Slot, SlotDetails, SlotFields},
    },
    store::{ParticipantStore, SlotStore},
};
use uuid::Uuid;

use crate::{
    DbPool,
    repositories::{participant, slot},
};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Loads every participant referenced by `slots` in one query and
    /// resolves each slot against them.
    async fn resolve(&self, slots: Vec<Slot>) -> SchedulingResult<Vec<SlotDetails>> {
        let mut ids: Vec<Uuid> = slots.iter().flat_map(|s| s.participants.iter().copied()).collect();
        ids.sort();
        ids.dedup();

        let directory: HashMap<Uuid, Participant> =
            participant::get_participants_by_ids(&self.pool, &ids)
                .await?
                .into_iter()
                .map(|row| (row.id, Participant::from(row)))
                .collect();

        Ok(slots
            .into_iter()
            .map(|slot| SlotDetails::resolve(slot, &directory))
            .collect())
    }
}

#[async_trait]
impl ParticipantStore for PgStore {
    async fn add(&self, new: NewParticipant) -> SchedulingResult<Participant> {
        let row = participant::create_participant(&self.pool, &new.name, &new.phone, &new.email).await?;
        Ok(row.into())
    }

    async fn list_all(&self) -> SchedulingResult<Vec<Participant>> {
        let rows = participant::list_participants(&self.pool).await?;
        Ok(rows.into_iter().map(Participant::from).collect())
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> SchedulingResult<Vec<Participant>> {
        let rows = participant::get_participants_by_ids(&self.pool, ids).await?;
        Ok(rows.into_iter().map(Participant::from).collect())
    }
}

#[async_trait]
impl SlotStore for PgStore {
    async fn create(&self, fields: SlotFields) -> SchedulingResult<Slot> {
        let row = slot::create_slot(
            &self.pool,
            &fields.description,
            &fields.category,
            fields.range.start,
            fields.range.end,
            &fields.participants,
        )
        .await?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: Uuid) -> SchedulingResult<Option<Slot>> {
        Ok(slot::get_slot_by_id(&self.pool, id).await?.map(Slot::from))
    }

    async fn get_with_participants(&self, id: Uuid) -> SchedulingResult<Option<SlotDetails>> {
        let Some(found) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        Ok(self.resolve(vec![found]).await?.pop())
    }

    async fn list_all(&self) -> SchedulingResult<Vec<Slot>> {
        let rows = slot::list_slots(&self.pool).await?;
        Ok(rows.into_iter().map(Slot::from).collect())
    }

    async fn list_all_with_participants(&self) -> SchedulingResult<Vec<SlotDetails>> {
        let slots = SlotStore::list_all(self).await?;
        self.resolve(slots).await
    }

    async fn update_by_id(&self, id: Uuid, fields: SlotFields) -> SchedulingResult<Option<Slot>> {
        let row = slot::update_slot(
            &self.pool,
            id,
            &fields.description,
            &fields.category,
            fields.range.start,
            fields.range.end,
            &fields.participants,
        )
        .await?;

        Ok(row.map(Slot::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> SchedulingResult<bool> {
        Ok(slot::delete_slot(&self.pool, id).await?)
    }

    async fn find_conflict(&self, query: &ConflictQuery) -> SchedulingResult<Option<Slot>> {
        let row = slot::find_conflicting_slot(
            &self.pool,
            query.range.start,
            query.range.end,
            &query.participant_ids,
            query.exclude,
        )
        .await?;

        Ok(row.map(Slot::from))
    }
}
