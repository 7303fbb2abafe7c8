//! Scheduling conflict detection
//!
//! A candidate event conflicts with an existing event when their time
//! ranges overlap and the two are relevant to each other: they share an
//! attendee, or either one is a family-wide event.

use chrono::{DateTime, Utc};
use famcal_core::{Event, EventDraft};

/// Category treated as family-wide; such events conflict with everything.
pub const FAMILY_CATEGORY: &str = "Family";

/// How many conflicts callers list before collapsing into an overflow count.
pub const CONFLICT_DISPLAY_LIMIT: usize = 3;

/// The time range, attendees and category of an event being composed.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub attendee_ids: &'a [i64],
    pub category: &'a str,
}

impl<'a> From<&'a EventDraft> for Candidate<'a> {
    fn from(draft: &'a EventDraft) -> Self {
        Self {
            start: draft.start_time,
            end: draft.end_time,
            attendee_ids: &draft.attendee_ids,
            category: &draft.category,
        }
    }
}

/// Find existing events the candidate collides with, in input order.
///
/// Intervals are half-open `[start, end)`: an event ending exactly when
/// the candidate begins is not a conflict, and zero-duration events never
/// match. Events whose stored timestamps fail to parse are skipped.
pub fn detect_conflicts<'a>(candidate: Candidate<'_>, existing: &'a [Event]) -> Vec<&'a Event> {
    existing
        .iter()
        .filter(|event| {
            let (Some(start), Some(end)) = (event.start(), event.end()) else {
                return false;
            };

            if !(candidate.start < end && candidate.end > start) {
                return false;
            }

            let shares_attendee = event
                .attendees
                .iter()
                .any(|u| candidate.attendee_ids.contains(&u.id));

            shares_attendee
                || event.category == FAMILY_CATEGORY
                || candidate.category == FAMILY_CATEGORY
        })
        .collect()
}
