//! Assistant request/response types
//!
//! The assistant parses free text into structured items. Events come
//! back with a calendar date plus `HH:MM` wall-clock strings; the
//! backend has shipped both `shopping_items`/`chores` and
//! `shopping_list`/`todos` as field names, so the response accepts
//! either spelling.

use chrono::{DateTime, Utc};
use famcal_core::time::parse_utc;
use serde::{Deserialize, Serialize};

/// Body for `POST /api/assistant/interact`
#[derive(Debug, Clone, Serialize)]
pub struct InteractRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Structured items extracted from one utterance
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractResponse {
    #[serde(default)]
    pub events: Vec<ParsedEvent>,
    #[serde(default, alias = "shopping_items")]
    pub shopping_list: Vec<ParsedShoppingItem>,
    #[serde(default, alias = "chores")]
    pub todos: Vec<ParsedTodo>,
}

impl InteractResponse {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.shopping_list.is_empty() && self.todos.is_empty()
    }
}

/// A calendar event the assistant extracted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: Option<String>,
    /// `HH:MM` (24h)
    #[serde(default)]
    pub start_time: Option<String>,
    /// `HH:MM` (24h)
    #[serde(default)]
    pub end_time: Option<String>,
    /// Member names, not ids; the caller resolves them against the roster.
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub travel_time_minutes: Option<i64>,
}

impl ParsedEvent {
    fn instant(&self, hhmm: &str) -> Option<DateTime<Utc>> {
        let date = self.date.as_deref()?;
        parse_utc(&format!("{}T{}:00", date, hhmm))
    }

    /// Combine date and wall-clock strings into instants, when both parse.
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = self.instant(self.start_time.as_deref()?)?;
        let end = self.instant(self.end_time.as_deref()?)?;
        Some((start, end))
    }
}

/// A shopping item the assistant extracted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedShoppingItem {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// A to-do the assistant extracted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedTodo {
    pub title: String,
    /// Member name, not id.
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub reward_amount: i64,
}

/// Body for `POST /api/assistant/search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// Response of `POST /api/assistant/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub suggestions: Vec<EventSuggestion>,
}

/// A real-world event idea found by the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSuggestion {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO-8601 instants, unlike [`ParsedEvent`]'s split fields.
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub budget_estimate: Option<String>,
    #[serde(default)]
    pub travel_time_minutes: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub suggested_attendees: Vec<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub ticket_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interact_response_accepts_both_spellings() {
        let legacy: InteractResponse = serde_json::from_str(
            r#"{"events": [], "chores": [{"title": "Dishes"}], "shopping_items": [{"name": "Milk"}]}"#,
        )
        .unwrap();
        assert_eq!(legacy.todos.len(), 1);
        assert_eq!(legacy.shopping_list.len(), 1);

        let current: InteractResponse = serde_json::from_str(
            r#"{"todos": [{"title": "Dishes"}], "shopping_list": [{"name": "Milk"}]}"#,
        )
        .unwrap();
        assert_eq!(current.todos.len(), 1);
        assert_eq!(current.shopping_list.len(), 1);
    }

    #[test]
    fn test_parsed_event_time_range() {
        let event: ParsedEvent = serde_json::from_str(
            r#"{"title": "Dinner", "date": "2025-03-01", "start_time": "18:30", "end_time": "19:30"}"#,
        )
        .unwrap();
        let (start, end) = event.time_range().unwrap();
        assert_eq!((end - start).num_minutes(), 60);
        assert_eq!(famcal_core::time::format_hhmm(start), "18:30");
    }

    #[test]
    fn test_parsed_event_missing_fields_yield_no_range() {
        let event: ParsedEvent =
            serde_json::from_str(r#"{"title": "Dinner", "start_time": "18:30"}"#).unwrap();
        assert!(event.time_range().is_none());
    }
}
