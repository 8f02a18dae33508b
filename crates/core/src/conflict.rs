//! Double-booking detection.
//!
//! Two slots conflict when they share at least one participant and their
//! time ranges overlap. Every comparison is inclusive, so a slot ending at
//! 11:00 conflicts with one starting at 11:00.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SchedulingResult;
use crate::models::slot::Slot;
use crate::store::SlotStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn is_well_ordered(&self) -> bool {
        self.end >= self.start
    }

    /// Inclusive overlap test of this (candidate) range against an existing
    /// booking `[s, e]`:
    ///
    /// 1. the candidate starts inside `[s, e]`, or
    /// 2. the candidate ends inside `[s, e]`, or
    /// 3. the candidate contains `[s, e]`.
    ///
    /// For well-ordered ranges this is the same as `start <= e && s <= end`,
    /// which makes it symmetric. An existing range that contains the
    /// candidate is caught by clause 1.
    pub fn overlaps(&self, existing: &TimeRange) -> bool {
        let (s, e) = (existing.start, existing.end);

        (s <= self.start && self.start <= e)
            || (s <= self.end && self.end <= e)
            || (self.start <= s && e <= self.end)
    }
}

/// Search for a slot that would clash with a candidate booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictQuery {
    pub range: TimeRange,
    pub participant_ids: Vec<Uuid>,
    /// Slot to ignore, set when re-checking a slot that is being edited.
    pub exclude: Option<Uuid>,
}

impl ConflictQuery {
    pub fn new(range: TimeRange, participant_ids: Vec<Uuid>) -> Self {
        Self {
            range,
            participant_ids,
            exclude: None,
        }
    }

    pub fn excluding(mut self, slot_id: Uuid) -> Self {
        self.exclude = Some(slot_id);
        self
    }

    /// Application-level form of the query, for stores that scan.
    pub fn matches(&self, slot: &Slot) -> bool {
        if self.exclude == Some(slot.id) {
            return false;
        }

        let shares_participant = slot
            .participants
            .iter()
            .any(|id| self.participant_ids.contains(id));

        shares_participant && self.range.overlaps(&slot.range())
    }
}

/// Reports whether any stored slot clashes with `query`. Stops at the
/// first match.
pub async fn has_conflict(store: &dyn SlotStore, query: &ConflictQuery) -> SchedulingResult<bool> {
    Ok(store.find_conflict(query).await?.is_some())
}
