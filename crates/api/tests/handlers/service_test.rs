use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use slotbook_api::service::SchedulingService;
use slotbook_core::{
    errors::SchedulingError,
    models::participant::{NewParticipant, Participant},
    store::SlotStore,
    time::{DEFAULT_INPUT_OFFSET, parse_offset},
    validation::{END_BEFORE_START, INSUFFICIENT_PARTICIPANTS, PARTICIPANT_CLASH, UNKNOWN_PARTICIPANT},
};
use slotbook_db::mock::repositories::{MockParticipantRepo, MockSlotRepo};
use uuid::Uuid;

use crate::test_utils::{TestContext, slot_request};

fn expect_conflict(err: SchedulingError) {
    match err {
        SchedulingError::Conflict(msg) => assert_eq!(msg, PARTICIPANT_CLASH),
        other => panic!("expected conflict, got {:?}", other),
    }
}

fn expect_validation(err: SchedulingError, message: &str) {
    match err {
        SchedulingError::Validation(msg) => assert_eq!(msg, message),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test_log::test(tokio::test)]
async fn test_create_stores_utc_instants() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;

    let slot = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &p))
        .await
        .unwrap();

    assert_eq!(slot.start_time, Utc.with_ymd_and_hms(2024, 5, 1, 4, 30, 0).unwrap());
    assert_eq!(slot.end_time, Utc.with_ymd_and_hms(2024, 5, 1, 5, 30, 0).unwrap());
    assert_eq!(slot.participants, p);
}

#[test_log::test(tokio::test)]
async fn test_shared_participant_overlap_is_rejected() {
    let ctx = TestContext::new();
    let p = ctx.participants(3).await;

    ctx.service
        .create_slot(&slot_request("10:00", "11:00", &[p[0], p[1]]))
        .await
        .unwrap();
    let err = ctx
        .service
        .create_slot(&slot_request("10:30", "11:30", &[p[1], p[2]]))
        .await
        .unwrap_err();

    expect_conflict(err);
    assert_eq!(ctx.store.list_all().await.unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_disjoint_participants_may_share_time() {
    let ctx = TestContext::new();
    let p = ctx.participants(4).await;

    ctx.service
        .create_slot(&slot_request("10:00", "11:00", &[p[0], p[1]]))
        .await
        .unwrap();
    let second = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &[p[2], p[3]]))
        .await;

    assert!(second.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_edit_excludes_itself() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;

    let slot = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &p))
        .await
        .unwrap();

    let unchanged = ctx
        .service
        .edit_slot(slot.id, &slot_request("10:00", "11:00", &p))
        .await;
    assert!(unchanged.is_ok());

    let moved = ctx
        .service
        .edit_slot(slot.id, &slot_request("10:30", "11:30", &p))
        .await
        .unwrap();
    assert_eq!(moved.id, slot.id);
    assert_eq!(moved.start_time, Utc.with_ymd_and_hms(2024, 5, 1, 5, 0, 0).unwrap());
}

#[test_log::test(tokio::test)]
async fn test_edit_into_another_booking_is_rejected() {
    let ctx = TestContext::new();
    let p = ctx.participants(3).await;

    ctx.service
        .create_slot(&slot_request("10:00", "11:00", &[p[0], p[1]]))
        .await
        .unwrap();
    let later = ctx
        .service
        .create_slot(&slot_request("13:00", "14:00", &[p[1], p[2]]))
        .await
        .unwrap();

    let err = ctx
        .service
        .edit_slot(later.id, &slot_request("10:45", "11:15", &[p[1], p[2]]))
        .await
        .unwrap_err();

    expect_conflict(err);
    let stored = ctx.store.get_by_id(later.id).await.unwrap().unwrap();
    assert_eq!(stored.start_time, later.start_time);
}

#[test_log::test(tokio::test)]
async fn test_touching_boundary_counts_as_clash() {
    let ctx = TestContext::new();
    let p = ctx.participants(3).await;

    ctx.service
        .create_slot(&slot_request("10:00", "11:00", &[p[0], p[1]]))
        .await
        .unwrap();
    let err = ctx
        .service
        .create_slot(&slot_request("11:00", "12:00", &[p[1], p[2]]))
        .await
        .unwrap_err();

    expect_conflict(err);
}

#[test_log::test(tokio::test)]
async fn test_candidate_inside_existing_is_rejected() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;

    ctx.service
        .create_slot(&slot_request("09:00", "12:00", &p))
        .await
        .unwrap();
    let err = ctx
        .service
        .create_slot(&slot_request("10:00", "10:30", &p))
        .await
        .unwrap_err();

    expect_conflict(err);
}

#[test_log::test(tokio::test)]
async fn test_validation_runs_before_anything_is_stored() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;

    let backwards = ctx
        .service
        .create_slot(&slot_request("11:00", "10:00", &p))
        .await
        .unwrap_err();
    expect_validation(backwards, END_BEFORE_START);

    let alone = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &p[..1]))
        .await
        .unwrap_err();
    expect_validation(alone, INSUFFICIENT_PARTICIPANTS);

    let stranger = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &[p[0], Uuid::new_v4()]))
        .await
        .unwrap_err();
    expect_validation(stranger, UNKNOWN_PARTICIPANT);

    assert!(ctx.store.list_all().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_missing_ids_report_not_found() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;
    let missing = Uuid::new_v4();

    assert!(matches!(
        ctx.service.delete_slot(missing).await,
        Err(SchedulingError::NotFound(_))
    ));
    assert!(matches!(
        ctx.service.get_slot(missing).await,
        Err(SchedulingError::NotFound(_))
    ));
    assert!(matches!(
        ctx.service.edit_slot(missing, &slot_request("10:00", "11:00", &p)).await,
        Err(SchedulingError::NotFound(_))
    ));
}

#[test_log::test(tokio::test)]
async fn test_delete_frees_the_time() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;

    let slot = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &p))
        .await
        .unwrap();
    ctx.service.delete_slot(slot.id).await.unwrap();

    assert!(ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &p))
        .await
        .is_ok());
    assert_eq!(ctx.service.list_participants().await.unwrap().len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_get_slot_resolves_participants() {
    let ctx = TestContext::new();
    let p = ctx.participants(2).await;

    let slot = ctx
        .service
        .create_slot(&slot_request("10:00", "11:00", &[p[1], p[0]]))
        .await
        .unwrap();
    let details = ctx.service.get_slot(slot.id).await.unwrap();

    let ids: Vec<Uuid> = details.participants.iter().map(|x| x.id).collect();
    assert_eq!(ids, vec![p[1], p[0]]);
}

#[test_log::test(tokio::test)]
async fn test_blank_participant_name_is_rejected() {
    let ctx = TestContext::new();

    let err = ctx
        .service
        .add_participant(NewParticipant {
            name: " ".to_string(),
            phone: String::new(),
            email: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SchedulingError::Validation(_)));
}

fn known_participants() -> MockParticipantRepo {
    let mut participants = MockParticipantRepo::new();
    participants.expect_get_by_ids().returning(|ids| {
        Ok(ids
            .iter()
            .map(|id| Participant {
                id: *id,
                name: "Known".to_string(),
                phone: String::new(),
                email: String::new(),
            })
            .collect())
    });
    participants
}

#[tokio::test]
async fn test_store_failure_during_check_aborts_create() {
    let mut slots = MockSlotRepo::new();
    slots
        .expect_find_conflict()
        .times(1)
        .returning(|_| Err(SchedulingError::Persistence(eyre::eyre!("connection reset"))));
    slots.expect_create().times(0);

    let service = SchedulingService::new(
        Arc::new(slots),
        Arc::new(known_participants()),
        parse_offset(DEFAULT_INPUT_OFFSET).unwrap(),
    );

    let err = service
        .create_slot(&slot_request("10:00", "11:00", &[Uuid::new_v4(), Uuid::new_v4()]))
        .await
        .unwrap_err();

    assert!(matches!(err, SchedulingError::Persistence(_)));
}

#[tokio::test]
async fn test_edit_passes_own_id_as_exclusion() {
    let id = Uuid::new_v4();
    let mut slots = MockSlotRepo::new();
    slots
        .expect_find_conflict()
        .withf(move |query| query.exclude == Some(id))
        .times(1)
        .returning(|_| Ok(None));
    slots
        .expect_update_by_id()
        .with(predicate::eq(id), predicate::always())
        .times(1)
        .returning(|_, _| Ok(None));

    let service = SchedulingService::new(
        Arc::new(slots),
        Arc::new(known_participants()),
        parse_offset(DEFAULT_INPUT_OFFSET).unwrap(),
    );

    let result = service
        .edit_slot(id, &slot_request("10:00", "11:00", &[Uuid::new_v4(), Uuid::new_v4()]))
        .await;

    assert!(matches!(result, Err(SchedulingError::NotFound(_))));
}
