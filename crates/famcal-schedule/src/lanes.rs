//! Resource-lane calendar projection
//!
//! The family calendar can render as one merged timeline or as swim
//! lanes, one column per member. Projection is a pure transform over the
//! fetched event list: each event is emitted once per member it involves
//! (attendees plus the nominated driver).

use famcal_core::{Event, User};

/// How events are mapped onto the calendar surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    /// One record per event, no lane tag.
    Unified,
    /// One record per (event, involved member) pair.
    ByResource,
}

/// A swim-lane column derived from the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    pub id: i64,
    pub label: String,
}

/// An event projected onto the calendar, optionally tagged with the lane
/// it belongs to.
#[derive(Debug, Clone)]
pub struct LaneEvent<'a> {
    pub event: &'a Event,
    pub resource_id: Option<i64>,
}

/// One lane per roster member, in roster order.
///
/// Lanes exist only for members present in the roster; an event referring
/// to an unknown member id projects into a lane no column is drawn for.
pub fn lanes(roster: &[User]) -> Vec<Lane> {
    roster
        .iter()
        .map(|user| Lane {
            id: user.id,
            label: user.name.clone(),
        })
        .collect()
}

/// The member ids an event occupies a lane for: its attendees plus the
/// driver, deduplicated, in that order.
fn relevant_resource_ids(event: &Event) -> Vec<i64> {
    let mut ids = event.attendee_ids();
    if let Some(driver) = &event.driver {
        if !ids.contains(&driver.id) {
            ids.push(driver.id);
        }
    }
    ids
}

/// Project events for rendering.
///
/// In [`ProjectionMode::ByResource`], an event attended by three members
/// appears three times, once per lane. Events with neither attendees nor
/// a driver are dropped from the per-member view.
// TODO: surface attendee-less events in a shared lane once product
// decides where they belong; today they vanish from the family view.
pub fn project_events<'a>(events: &'a [Event], mode: ProjectionMode) -> Vec<LaneEvent<'a>> {
    match mode {
        ProjectionMode::Unified => events
            .iter()
            .map(|event| LaneEvent {
                event,
                resource_id: None,
            })
            .collect(),
        ProjectionMode::ByResource => events
            .iter()
            .flat_map(|event| {
                relevant_resource_ids(event)
                    .into_iter()
                    .map(move |id| LaneEvent {
                        event,
                        resource_id: Some(id),
                    })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: i64, name: &str) -> serde_json::Value {
        json!({"id": id, "name": name, "email": format!("{}@example.com", name)})
    }

    fn event_with(attendees: &[i64], driver: Option<i64>) -> Event {
        let attendee_objs: Vec<_> = attendees.iter().map(|i| user(*i, "member")).collect();
        let mut value = json!({
            "id": 1,
            "title": "Practice",
            "start_time": "2025-03-01T10:00:00Z",
            "end_time": "2025-03-01T11:00:00Z",
            "attendees": attendee_objs,
        });
        if let Some(d) = driver {
            value["driver"] = user(d, "driver");
        }
        serde_json::from_value(value).unwrap()
    }

    fn roster() -> Vec<User> {
        vec![
            serde_json::from_value(user(1, "Alice")).unwrap(),
            serde_json::from_value(user(2, "Bob")).unwrap(),
        ]
    }

    #[test]
    fn test_unified_one_record_per_event() {
        let events = vec![event_with(&[1, 2], None)];
        let projected = project_events(&events, ProjectionMode::Unified);
        assert_eq!(projected.len(), 1);
        assert!(projected[0].resource_id.is_none());
    }

    #[test]
    fn test_by_resource_one_record_per_attendee() {
        let events = vec![event_with(&[1, 2], None)];
        let projected = project_events(&events, ProjectionMode::ByResource);
        let tags: Vec<i64> = projected.iter().filter_map(|p| p.resource_id).collect();
        assert_eq!(tags, vec![1, 2]);
    }

    #[test]
    fn test_driver_gets_a_lane() {
        let events = vec![event_with(&[1], Some(3))];
        let projected = project_events(&events, ProjectionMode::ByResource);
        let tags: Vec<i64> = projected.iter().filter_map(|p| p.resource_id).collect();
        assert_eq!(tags, vec![1, 3]);
    }

    #[test]
    fn test_driver_who_also_attends_not_duplicated() {
        let events = vec![event_with(&[1, 2], Some(2))];
        let projected = project_events(&events, ProjectionMode::ByResource);
        let tags: Vec<i64> = projected.iter().filter_map(|p| p.resource_id).collect();
        assert_eq!(tags, vec![1, 2]);
    }

    #[test]
    fn test_unassigned_event_dropped_from_by_resource() {
        let events = vec![event_with(&[], None)];
        assert!(project_events(&events, ProjectionMode::ByResource).is_empty());
        // ...but still present in the unified view
        assert_eq!(project_events(&events, ProjectionMode::Unified).len(), 1);
    }

    #[test]
    fn test_lanes_follow_roster_order() {
        let lanes = lanes(&roster());
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[0], Lane { id: 1, label: "Alice".to_string() });
        assert_eq!(lanes[1], Lane { id: 2, label: "Bob".to_string() });
    }

    #[test]
    fn test_no_lane_invented_for_unknown_member() {
        // event involves member 9, roster knows only 1 and 2
        let events = vec![event_with(&[9], None)];
        let projected = project_events(&events, ProjectionMode::ByResource);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].resource_id, Some(9));

        let lane_ids: Vec<i64> = lanes(&roster()).iter().map(|l| l.id).collect();
        assert!(!lane_ids.contains(&9));
    }
}
