//! Domain models shared across the famcal workspace
//!
//! These mirror the JSON the household backend serves. Timestamps arrive
//! as ISO-8601 strings that may be missing the `Z` suffix, so event models
//! keep the raw strings and expose typed accessors through
//! [`crate::time::parse_utc`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time;

fn default_category() -> String {
    "General".to_string()
}

fn default_role() -> String {
    "member".to_string()
}

/// Budget range inside a member's preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Travel preferences inside a member's preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelPreferences {
    #[serde(default)]
    pub max_distance_miles: Option<f64>,
    #[serde(default)]
    pub preferred_transport: Option<String>,
}

/// Per-member preferences bag.
///
/// Only `schedule_travel_time` (and the home address, for assistant
/// context) are consumed by this client; everything else is carried
/// through untouched for the settings surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub schedule_travel_time: bool,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub wishlist: Option<Vec<String>>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub dietary: Option<String>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub travel: Option<TravelPreferences>,
    /// Fields this client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A family member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub family_id: Option<i64>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl User {
    /// Whether event creation should offer the travel-time adjustment.
    pub fn travel_time_enabled(&self) -> bool {
        self.preferences.schedule_travel_time
    }
}

/// A calendar event as served by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    /// ISO-8601, possibly missing the `Z` suffix. Use [`Event::start`].
    pub start_time: String,
    /// ISO-8601, possibly missing the `Z` suffix. Use [`Event::end`].
    pub end_time: String,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub commute_time_minutes: i64,
    #[serde(default)]
    pub family_id: Option<i64>,
    #[serde(default)]
    pub created_by_user_id: Option<i64>,
    #[serde(default)]
    pub attendees: Vec<User>,
    #[serde(default)]
    pub driver: Option<User>,
}

impl Event {
    /// Start instant, or `None` if the wire value is malformed.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        time::parse_utc(&self.start_time)
    }

    /// End instant, or `None` if the wire value is malformed.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        time::parse_utc(&self.end_time)
    }

    /// Attendee identifiers in attendee order.
    pub fn attendee_ids(&self) -> Vec<i64> {
        self.attendees.iter().map(|u| u.id).collect()
    }
}

/// A not-yet-persisted event, as composed by the creation flow.
///
/// Doubles as the create/update request body; `attendee_ids` and
/// `driver_id` are what the backend expects on writes.
#[derive(Debug, Clone, Serialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub category: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attendee_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<i64>,
}

impl EventDraft {
    /// A minimal draft with the given title and time range.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: None,
            category: default_category(),
            start_time: start,
            end_time: end,
            attendee_ids: Vec::new(),
            driver_id: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the attendee identifiers.
    pub fn with_attendees(mut self, ids: Vec<i64>) -> Self {
        self.attendee_ids = ids;
        self
    }
}

/// A shopping-list item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_bought: bool,
    #[serde(default)]
    pub family_id: Option<i64>,
    #[serde(default)]
    pub added_by_user_id: Option<i64>,
}

/// A to-do (chore) item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `pending` or `completed`.
    #[serde(default = "default_todo_status")]
    pub status: String,
    /// ISO-8601, possibly missing the `Z` suffix.
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub assigned_to_user_id: Option<i64>,
    #[serde(default)]
    pub reward_amount: i64,
    #[serde(default)]
    pub family_id: Option<i64>,
}

fn default_todo_status() -> String {
    "pending".to_string()
}

impl Todo {
    pub fn is_completed(&self) -> bool {
        self.status == "completed"
    }

    /// Due instant, or `None` if absent or malformed.
    pub fn due(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(time::parse_utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event_json() -> &'static str {
        r#"{
            "id": 7,
            "title": "Soccer practice",
            "start_time": "2025-03-01T10:00:00",
            "end_time": "2025-03-01T11:00:00Z",
            "category": "Hobby",
            "attendees": [
                {"id": 1, "name": "Alice", "email": "alice@example.com"},
                {"id": 2, "name": "Bob", "email": "bob@example.com"}
            ]
        }"#
    }

    #[test]
    fn test_event_deserialize_defaults() {
        let event: Event = serde_json::from_str(sample_event_json()).unwrap();
        assert_eq!(event.title, "Soccer practice");
        assert!(event.description.is_none());
        assert_eq!(event.commute_time_minutes, 0);
        assert!(event.driver.is_none());
        assert_eq!(event.attendee_ids(), vec![1, 2]);
    }

    #[test]
    fn test_event_times_coerced_to_utc() {
        let event: Event = serde_json::from_str(sample_event_json()).unwrap();
        // start lacks the suffix, end carries it; both land one hour apart
        let start = event.start().unwrap();
        let end = event.end().unwrap();
        assert_eq!((end - start).num_minutes(), 60);
    }

    #[test]
    fn test_user_default_role_and_prefs() {
        let user: User =
            serde_json::from_str(r#"{"id": 1, "name": "Alice", "email": "a@example.com"}"#)
                .unwrap();
        assert_eq!(user.role, "member");
        assert!(!user.travel_time_enabled());
    }

    #[test]
    fn test_preferences_pass_through() {
        let user: User = serde_json::from_str(
            r#"{
                "id": 1, "name": "Alice", "email": "a@example.com",
                "preferences": {
                    "schedule_travel_time": true,
                    "address": "12 Elm St",
                    "favorite_color": "teal"
                }
            }"#,
        )
        .unwrap();
        assert!(user.travel_time_enabled());
        assert_eq!(user.preferences.address.as_deref(), Some("12 Elm St"));
        // unknown keys survive a round trip
        let back = serde_json::to_value(&user.preferences).unwrap();
        assert_eq!(back["favorite_color"], "teal");
    }

    #[test]
    fn test_draft_serializes_write_shape() {
        let start = crate::time::parse_utc("2025-03-01T09:00:00Z").unwrap();
        let end = crate::time::parse_utc("2025-03-01T10:00:00Z").unwrap();
        let draft = EventDraft::new("Dentist", start, end).with_attendees(vec![3]);
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["attendee_ids"], serde_json::json!([3]));
        assert!(json.get("driver_id").is_none());
        assert_eq!(json["category"], "General");
    }

    #[test]
    fn test_todo_status() {
        let todo: Todo = serde_json::from_str(
            r#"{"id": 1, "title": "Dishes", "status": "completed", "due_date": "2025-03-02T18:00:00"}"#,
        )
        .unwrap();
        assert!(todo.is_completed());
        assert!(todo.due().is_some());
    }
}
