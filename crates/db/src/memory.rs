//! In-process store. Backs the test suites and `DATABASE_URL=memory`
//! demo runs; contents are lost on exit.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use slotbook_core::{
    conflict::ConflictQuery,
    errors::SchedulingResult,
    models::{
        participant::{NewParticipant, Participant},
        slot::{Slot, SlotDetails, SlotFields},
    },
    store::{ParticipantStore, SlotStore},
};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Collections {
    participants: Vec<Participant>,
    slots: Vec<Slot>,
}

impl Collections {
    fn directory(&self) -> HashMap<Uuid, Participant> {
        self.participants
            .iter()
            .map(|p| (p.id, p.clone()))
            .collect()
    }

    fn sorted_slots(&self) -> Vec<Slot> {
        let mut slots = self.slots.clone();
        slots.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then(a.created_at.cmp(&b.created_at))
        });
        slots
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ParticipantStore for MemoryStore {
    async fn add(&self, new: NewParticipant) -> SchedulingResult<Participant> {
        let participant = Participant {
            id: Uuid::new_v4(),
            name: new.name,
            phone: new.phone,
            email: new.email,
        };

        self.inner.write().await.participants.push(participant.clone());
        Ok(participant)
    }

    async fn list_all(&self) -> SchedulingResult<Vec<Participant>> {
        Ok(self.inner.read().await.participants.clone())
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> SchedulingResult<Vec<Participant>> {
        let inner = self.inner.read().await;
        Ok(inner
            .participants
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SlotStore for MemoryStore {
    async fn create(&self, fields: SlotFields) -> SchedulingResult<Slot> {
        let slot = Slot {
            id: Uuid::new_v4(),
            description: fields.description,
            category: fields.category,
            start_time: fields.range.start,
            end_time: fields.range.end,
            participants: fields.participants,
            created_at: Utc::now(),
        };

        self.inner.write().await.slots.push(slot.clone());
        Ok(slot)
    }

    async fn get_by_id(&self, id: Uuid) -> SchedulingResult<Option<Slot>> {
        let inner = self.inner.read().await;
        Ok(inner.slots.iter().find(|s| s.id == id).cloned())
    }

    async fn get_with_participants(&self, id: Uuid) -> SchedulingResult<Option<SlotDetails>> {
        let inner = self.inner.read().await;
        let directory = inner.directory();

        Ok(inner
            .slots
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .map(|slot| SlotDetails::resolve(slot, &directory)))
    }

    async fn list_all(&self) -> SchedulingResult<Vec<Slot>> {
        Ok(self.inner.read().await.sorted_slots())
    }

    async fn list_all_with_participants(&self) -> SchedulingResult<Vec<SlotDetails>> {
        let inner = self.inner.read().await;
        let directory = inner.directory();

        Ok(inner
            .sorted_slots()
            .into_iter()
            .map(|slot| SlotDetails::resolve(slot, &directory))
            .collect())
    }

    async fn update_by_id(&self, id: Uuid, fields: SlotFields) -> SchedulingResult<Option<Slot>> {
        let mut inner = self.inner.write().await;
        let Some(slot) = inner.slots.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };

        slot.description = fields.description;
        slot.category = fields.category;
        slot.start_time = fields.range.start;
        slot.end_time = fields.range.end;
        slot.participants = fields.participants;

        Ok(Some(slot.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> SchedulingResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.slots.len();
        inner.slots.retain(|s| s.id != id);
        Ok(inner.slots.len() < before)
    }

    async fn find_conflict(&self, query: &ConflictQuery) -> SchedulingResult<Option<Slot>> {
        let inner = self.inner.read().await;
        Ok(inner.slots.iter().find(|s| query.matches(s)).cloned())
    }
}
