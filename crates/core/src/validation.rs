use chrono::FixedOffset;
use uuid::Uuid;

use crate::conflict::TimeRange;
use crate::errors::{SchedulingError, SchedulingResult};
use crate::models::participant::NewParticipant;
use crate::models::slot::{SlotFields, SlotRequest};
use crate::time::compose;

pub const MIN_PARTICIPANTS: usize = 2;

pub const END_BEFORE_START: &str = "End time cannot be before start time";
pub const INSUFFICIENT_PARTICIPANTS: &str = "Number of participants must be at least 2";
pub const UNKNOWN_PARTICIPANT: &str = "Unknown participant";
pub const PARTICIPANT_CLASH: &str = "Time clash with one of the participants";
pub const MISSING_NAME: &str = "Participant name is required";

pub fn validate_range(range: &TimeRange) -> SchedulingResult<()> {
    if !range.is_well_ordered() {
        return Err(SchedulingError::Validation(END_BEFORE_START.to_string()));
    }
    Ok(())
}

/// Parses submitted participant ids, dropping blanks and repeats while
/// keeping first-seen order, and enforces the minimum head count.
pub fn normalize_participants(raw: &[String]) -> SchedulingResult<Vec<Uuid>> {
    let mut ids: Vec<Uuid> = Vec::with_capacity(raw.len());

    for value in raw.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        let id = Uuid::parse_str(value).map_err(|_| {
            SchedulingError::Validation(format!("Invalid participant id: {}", value))
        })?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if ids.len() < MIN_PARTICIPANTS {
        return Err(SchedulingError::Validation(
            INSUFFICIENT_PARTICIPANTS.to_string(),
        ));
    }

    Ok(ids)
}

/// Turns a submitted form into the fields a store writes: composes the
/// instants, then checks ordering, then participants.
pub fn prepare_slot(request: &SlotRequest, offset: FixedOffset) -> SchedulingResult<SlotFields> {
    let start = compose(&request.date, &request.start_time, offset)?;
    let end = compose(&request.date, &request.end_time, offset)?;
    let range = TimeRange::new(start, end);

    validate_range(&range)?;
    let participants = normalize_participants(&request.pid)?;

    Ok(SlotFields {
        description: request.description.trim().to_string(),
        category: request.category.trim().to_string(),
        range,
        participants,
    })
}

pub fn validate_new_participant(participant: &NewParticipant) -> SchedulingResult<()> {
    if participant.name.trim().is_empty() {
        return Err(SchedulingError::Validation(MISSING_NAME.to_string()));
    }
    Ok(())
}
