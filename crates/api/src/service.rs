//! # Scheduling Service
//!
//! Orchestrates every slot and participant operation. Each call is a single
//! request-scoped transition: validate, check for clashes, then write.
//!
//! The clash check and the write are separate store calls with no
//! transaction between them, so two concurrent requests for overlapping
//! ranges can both pass the check.

use std::sync::Arc;

use chrono::FixedOffset;
use slotbook_core::{
    conflict::{ConflictQuery, has_conflict},
    errors::{SchedulingError, SchedulingResult},
    models::{
        participant::{NewParticipant, Participant},
        slot::{Slot, SlotDetails, SlotFields, SlotRequest},
    },
    store::{ParticipantStore, SlotStore},
    validation::{PARTICIPANT_CLASH, UNKNOWN_PARTICIPANT, prepare_slot, validate_new_participant},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct SchedulingService {
    slots: Arc<dyn SlotStore>,
    participants: Arc<dyn ParticipantStore>,
    input_offset: FixedOffset,
}

impl SchedulingService {
    pub fn new(
        slots: Arc<dyn SlotStore>,
        participants: Arc<dyn ParticipantStore>,
        input_offset: FixedOffset,
    ) -> Self {
        Self {
            slots,
            participants,
            input_offset,
        }
    }

    /// Uses one backend for both collections.
    pub fn with_store<S>(store: Arc<S>, input_offset: FixedOffset) -> Self
    where
        S: SlotStore + ParticipantStore + 'static,
    {
        Self::new(store.clone(), store, input_offset)
    }

    pub fn input_offset(&self) -> FixedOffset {
        self.input_offset
    }

    pub async fn add_participant(&self, participant: NewParticipant) -> SchedulingResult<Participant> {
        validate_new_participant(&participant)?;

        let created = self.participants.add(participant).await?;
        info!("Participant created: id={}", created.id);
        Ok(created)
    }

    pub async fn list_participants(&self) -> SchedulingResult<Vec<Participant>> {
        self.participants.list_all().await
    }

    pub async fn create_slot(&self, request: &SlotRequest) -> SchedulingResult<Slot> {
        let fields = self.prepare(request).await?;

        let query = ConflictQuery::new(fields.range, fields.participants.clone());
        self.ensure_no_conflict(&query).await?;

        let slot = self.slots.create(fields).await?;
        info!("Slot scheduled: id={}, start={}, end={}", slot.id, slot.start_time, slot.end_time);
        Ok(slot)
    }

    /// Replaces every field of slot `id`. The slot's current booking is
    /// ignored by the clash check.
    pub async fn edit_slot(&self, id: Uuid, request: &SlotRequest) -> SchedulingResult<Slot> {
        let fields = self.prepare(request).await?;

        let query = ConflictQuery::new(fields.range, fields.participants.clone()).excluding(id);
        self.ensure_no_conflict(&query).await?;

        let slot = self
            .slots
            .update_by_id(id, fields)
            .await?
            .ok_or_else(|| slot_not_found(id))?;

        info!("Slot updated: id={}", slot.id);
        Ok(slot)
    }

    pub async fn delete_slot(&self, id: Uuid) -> SchedulingResult<()> {
        if !self.slots.delete_by_id(id).await? {
            return Err(slot_not_found(id));
        }

        info!("Slot deleted: id={}", id);
        Ok(())
    }

    pub async fn get_slot(&self, id: Uuid) -> SchedulingResult<SlotDetails> {
        self.slots
            .get_with_participants(id)
            .await?
            .ok_or_else(|| slot_not_found(id))
    }

    pub async fn list_slots(&self) -> SchedulingResult<Vec<SlotDetails>> {
        self.slots.list_all_with_participants().await
    }

    async fn prepare(&self, request: &SlotRequest) -> SchedulingResult<SlotFields> {
        let fields = prepare_slot(request, self.input_offset)?;
        self.ensure_participants_exist(&fields.participants).await?;
        Ok(fields)
    }

    async fn ensure_participants_exist(&self, ids: &[Uuid]) -> SchedulingResult<()> {
        let found = self.participants.get_by_ids(ids).await?;
        if found.len() < ids.len() {
            warn!("Rejected slot with unknown participants: submitted={}, known={}", ids.len(), found.len());
            return Err(SchedulingError::Validation(UNKNOWN_PARTICIPANT.to_string()));
        }
        Ok(())
    }

    async fn ensure_no_conflict(&self, query: &ConflictQuery) -> SchedulingResult<()> {
        if has_conflict(self.slots.as_ref(), query).await? {
            debug!(
                "Clash detected: start={}, end={}, exclude={:?}",
                query.range.start, query.range.end, query.exclude
            );
            return Err(SchedulingError::Conflict(PARTICIPANT_CLASH.to_string()));
        }
        Ok(())
    }
}

fn slot_not_found(id: Uuid) -> SchedulingError {
    SchedulingError::NotFound(format!("Slot with ID {} not found", id))
}
