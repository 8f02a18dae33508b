use async_trait::async_trait;
use mockall::mock;
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

// Mock stores for testing
mock! {
    pub ParticipantRepo {}

    #[async_trait]
    impl ParticipantStore for ParticipantRepo {
        async fn add(&self, participant: NewParticipant) -> SchedulingResult<Participant>;

        async fn list_all(&self) -> SchedulingResult<Vec<Participant>>;

        async fn get_by_ids(&self, ids: &[Uuid]) -> SchedulingResult<Vec<Participant>>;
    }
}

mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotStore for SlotRepo {
        async fn create(&self, fields: SlotFields) -> SchedulingResult<Slot>;

        async fn get_by_id(&self, id: Uuid) -> SchedulingResult<Option<Slot>>;

        async fn get_with_participants(&self, id: Uuid) -> SchedulingResult<Option<SlotDetails>>;

        async fn list_all(&self) -> SchedulingResult<Vec<Slot>>;

        async fn list_all_with_participants(&self) -> SchedulingResult<Vec<SlotDetails>>;

        async fn update_by_id(&self, id: Uuid, fields: SlotFields) -> SchedulingResult<Option<Slot>>;

        async fn delete_by_id(&self, id: Uuid) -> SchedulingResult<bool>;

        async fn find_conflict(&self, query: &ConflictQuery) -> SchedulingResult<Option<Slot>>;
    }
}
