//! Travel-time adjustment
//!
//! When a member's preferences enable travel scheduling, the creation
//! flow shifts the stored start earlier by the travel duration and
//! appends a note recording the nominal start. The shifted instant is
//! what the backend persists; the meeting time a person would quote is
//! only recoverable from the note, so the inverse parse lives here too.

use chrono::Duration;
use famcal_core::time::format_hhmm;
use famcal_core::EventDraft;
use regex::Regex;
use std::sync::OnceLock;

/// A travel duration to fold into an event before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelAdjustment {
    pub minutes: i64,
}

impl TravelAdjustment {
    pub fn new(minutes: i64) -> Self {
        Self { minutes }
    }

    /// Shift the draft's start earlier and record the nominal time in the
    /// description. Non-positive durations leave the draft untouched.
    pub fn apply(&self, draft: &mut EventDraft) {
        if self.minutes <= 0 {
            return;
        }

        let nominal = draft.start_time;
        draft.start_time = nominal - Duration::minutes(self.minutes);

        let note = format!(
            "[Scheduled with {}m travel time. Original Event Start: {}]",
            self.minutes,
            format_hhmm(nominal)
        );
        draft.description = Some(match draft.description.take() {
            Some(existing) if !existing.is_empty() => format!("{}\n\n{}", existing, note),
            _ => note,
        });
    }
}

/// A parsed travel annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelNote {
    pub minutes: i64,
    /// Nominal start as the `HH:MM` wall clock the note recorded.
    pub original_start: String,
}

fn annotation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"\[Scheduled with (\d+)m travel time\. Original Event Start: (\d{1,2}:\d{2})\]",
        )
        .unwrap()
    })
}

/// Recover the travel note from an event description, if one was appended.
pub fn parse_annotation(description: &str) -> Option<TravelNote> {
    let caps = annotation_regex().captures(description)?;
    Some(TravelNote {
        minutes: caps[1].parse().ok()?,
        original_start: caps[2].to_string(),
    })
}
