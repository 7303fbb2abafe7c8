//! Command implementations
//!
//! Each REPL command (and the one-shot `--ask` mode) lands here. The
//! handlers fetch what they need, run the pure scheduling transforms and
//! print the result; nothing is cached between invocations.

use chrono::{DateTime, Datelike, Duration as ChronoDuration, NaiveDate, Utc};
use nu_ansi_term::Color;
use std::time::Duration;

use famcal_api::{FamilyApi, ShoppingItemDraft, TodoDraft};
use famcal_assistant::{AssistantClient, ParsedEvent, ParsedTodo};
use famcal_core::time::format_hhmm;
use famcal_core::{Config, Event, EventDraft, SessionStore, User};
use famcal_geo::{DebouncedSearch, GeoClient};
use famcal_schedule::{
    default_granularity, detect_conflicts, lanes, project_events, ProjectionMode,
    TravelAdjustment, ViewGranularity, CONFLICT_DISPLAY_LIMIT,
};
use famcal_voice::VoiceClient;

use crate::error::{FamcalError, Result};

/// Terminal sessions get the desktop view default.
const DESKTOP_VIEWPORT_PX: u32 = 1280;

/// Shared handles for everything a command may touch
pub struct App {
    pub config: Config,
    pub api: FamilyApi,
    pub assistant: AssistantClient,
    pub geo: DebouncedSearch,
    pub voice: VoiceClient,
    pub session_store: SessionStore,
}

impl App {
    /// Wire up the clients and restore any saved session.
    pub fn new(config: Config) -> Result<Self> {
        let session_store = SessionStore::new(&config.session.path);
        let mut api = FamilyApi::new(&config.api)?;

        match session_store.load() {
            Ok(Some(session)) => {
                tracing::info!("Restored saved session");
                api.set_session(Some(session));
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("Ignoring saved session: {}", e),
        }

        let assistant = AssistantClient::new(&config.api)?;
        let geo_client = GeoClient::new(&config.geocode)?;
        let geo = DebouncedSearch::new(
            geo_client,
            Duration::from_millis(config.geocode.debounce_ms),
        );
        let voice = VoiceClient::new(&config.api)?;

        Ok(Self {
            config,
            api,
            assistant,
            geo,
            voice,
            session_store,
        })
    }
}

// ----------------------------------------------------------------------
// Calendar
// ----------------------------------------------------------------------

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|n| n.and_utc())
        .unwrap_or_else(Utc::now)
}

fn range_for(granularity: ViewGranularity, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.date_naive();
    match granularity {
        ViewGranularity::Day => (day_start(today), day_start(today) + ChronoDuration::days(1)),
        ViewGranularity::Week => {
            let monday = today - ChronoDuration::days(today.weekday().num_days_from_monday() as i64);
            (day_start(monday), day_start(monday) + ChronoDuration::days(7))
        }
        ViewGranularity::Month => {
            let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
            let (next_year, next_month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap_or(today);
            (day_start(first), day_start(next_first))
        }
    }
}

fn in_range(event: &Event, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    match (event.start(), event.end()) {
        (Some(start), Some(end)) => start < to && end > from,
        _ => false,
    }
}

fn format_event_line(event: &Event) -> String {
    let when = match (event.start(), event.end()) {
        (Some(start), Some(end)) => format!(
            "{} {}-{}",
            start.format("%Y-%m-%d"),
            format_hhmm(start),
            format_hhmm(end)
        ),
        _ => "(invalid time)".to_string(),
    };
    let mut line = format!("#{:<4} {}  {}", event.id, when, event.title);
    if event.category != "General" {
        line.push_str(&format!("  [{}]", event.category));
    }
    if let Some(location) = &event.location {
        line.push_str(&format!("  @ {}", location));
    }
    line
}

/// `/events`: the unified calendar, defaulting to this month.
pub async fn list_events(app: &App, all: bool) -> Result<()> {
    let events = app.api.list_events().await?;

    let projected = project_events(&events, ProjectionMode::Unified);
    let mut rows: Vec<&Event> = projected.iter().map(|p| p.event).collect();
    rows.sort_by_key(|e| e.start());

    let rows: Vec<&Event> = if all {
        rows
    } else {
        let granularity = default_granularity(false, DESKTOP_VIEWPORT_PX);
        let (from, to) = range_for(granularity, Utc::now());
        rows.into_iter().filter(|e| in_range(e, from, to)).collect()
    };

    if rows.is_empty() {
        println!("No events{}.", if all { "" } else { " this month" });
        return Ok(());
    }

    for event in rows {
        println!("{}", format_event_line(event));
    }
    Ok(())
}

/// `/day`: the family swim-lane view for today, one lane per member.
pub async fn family_day(app: &App) -> Result<()> {
    let (events, roster) = tokio::join!(app.api.list_events(), app.api.list_users());
    let events = events?;
    let roster = roster?;

    // family view always renders a single day
    let granularity = default_granularity(true, DESKTOP_VIEWPORT_PX);
    let (from, to) = range_for(granularity, Utc::now());

    let projected = project_events(&events, ProjectionMode::ByResource);

    println!(
        "{}",
        Color::Cyan.bold().paint(format!("Family day: {}", from.format("%Y-%m-%d")))
    );

    for lane in lanes(&roster) {
        println!("{}", Color::Cyan.paint(format!("── {} ──", lane.label)));

        let mut lane_events: Vec<&Event> = projected
            .iter()
            .filter(|p| p.resource_id == Some(lane.id))
            .map(|p| p.event)
            .filter(|e| in_range(e, from, to))
            .collect();
        lane_events.sort_by_key(|e| e.start());

        if lane_events.is_empty() {
            println!("  (free)");
            continue;
        }
        for event in lane_events {
            let driving = event.driver.as_ref().map(|d| d.id) == Some(lane.id);
            let marker = if driving { "  (driving)" } else { "" };
            println!("  {}{}", format_event_line(event), marker);
        }
    }
    Ok(())
}

fn print_conflicts(conflicts: &[&Event]) {
    if conflicts.is_empty() {
        return;
    }

    println!("{}", Color::Yellow.bold().paint("Potential conflicts:"));
    for event in conflicts.iter().take(CONFLICT_DISPLAY_LIMIT) {
        let at = event.start().map(format_hhmm).unwrap_or_default();
        println!("  - {} ({})", event.title, at);
    }
    if conflicts.len() > CONFLICT_DISPLAY_LIMIT {
        println!("  ...and {} more", conflicts.len() - CONFLICT_DISPLAY_LIMIT);
    }
}

// ----------------------------------------------------------------------
// Assistant
// ----------------------------------------------------------------------

fn resolve_names(names: &[String], roster: &[User]) -> Vec<i64> {
    names
        .iter()
        .filter_map(|name| {
            roster
                .iter()
                .find(|u| u.name.eq_ignore_ascii_case(name))
                .map(|u| u.id)
        })
        .collect()
}

async fn create_parsed_event(
    app: &App,
    parsed: &ParsedEvent,
    existing: &[Event],
    roster: &[User],
) -> Result<()> {
    let Some((start, end)) = parsed.time_range() else {
        println!(
            "{}",
            Color::Yellow.paint(format!("Skipping \"{}\": missing or invalid time", parsed.title))
        );
        return Ok(());
    };

    let mut draft = EventDraft::new(parsed.title.as_str(), start, end)
        .with_category(parsed.category.clone().unwrap_or_else(|| "General".to_string()))
        .with_attendees(resolve_names(&parsed.attendees, roster));
    draft.description = parsed.description.clone();
    draft.location = parsed.location.clone();

    let conflicts = detect_conflicts((&draft).into(), existing);
    print_conflicts(&conflicts);

    // shift the start when the member schedules travel time and the
    // assistant suggested a duration
    if app.api.session().is_some_and(|s| s.travel_time_enabled()) {
        if let Some(minutes) = parsed.travel_time_minutes.filter(|m| *m > 0) {
            TravelAdjustment::new(minutes).apply(&mut draft);
            println!(
                "Start shifted {}m earlier for travel (leaves at {})",
                minutes,
                format_hhmm(draft.start_time)
            );
        }
    }

    let event = app.api.create_event(&draft).await?;
    println!(
        "{}",
        Color::Green.paint(format!("Created event #{}: {}", event.id, event.title))
    );
    Ok(())
}

async fn create_parsed_todo(app: &App, parsed: &ParsedTodo, roster: &[User]) -> Result<()> {
    let mut draft = TodoDraft::new(parsed.title.as_str());
    draft.due_date = parsed.due_date.clone();
    draft.reward_amount = parsed.reward_amount;
    if let Some(name) = &parsed.assigned_to {
        draft.assigned_to_user_id = roster
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(name))
            .map(|u| u.id);
    }

    let todo = app.api.create_todo(&draft).await?;
    println!(
        "{}",
        Color::Green.paint(format!("Added todo #{}: {}", todo.id, todo.title))
    );
    Ok(())
}

/// Free text: parse it through the assistant and create what comes back.
pub async fn interact(app: &App, text: &str) -> Result<()> {
    let user_id = app
        .api
        .session()
        .and_then(|s| s.user.as_ref())
        .map(|u| u.id);

    let reply = app.assistant.interact(text, user_id).await?;
    if reply.is_empty() {
        println!("Nothing actionable found in that.");
        return Ok(());
    }

    // conflicts are checked against the full fetched list; the roster
    // resolves attendee names to ids
    let (events, roster) = tokio::join!(app.api.list_events(), app.api.list_users());
    let existing = events.unwrap_or_else(|e| {
        tracing::warn!("Could not fetch events for conflict check: {}", e);
        Vec::new()
    });
    let roster = roster.unwrap_or_else(|e| {
        tracing::warn!("Could not fetch roster: {}", e);
        Vec::new()
    });

    for parsed in &reply.events {
        create_parsed_event(app, parsed, &existing, &roster).await?;
    }
    for item in &reply.shopping_list {
        let draft = match &item.category {
            Some(category) => {
                ShoppingItemDraft::new(item.name.as_str()).with_category(category.as_str())
            }
            None => ShoppingItemDraft::new(item.name.as_str()),
        };
        let created = app.api.add_shopping_item(&draft).await?;
        println!(
            "{}",
            Color::Green.paint(format!("Added to shopping list: {}", created.name))
        );
    }
    for todo in &reply.todos {
        create_parsed_todo(app, todo, &roster).await?;
    }

    Ok(())
}

/// `/find`: ask the assistant for real-world event ideas.
pub async fn find(app: &App, query: &str) -> Result<()> {
    let user_id = app
        .api
        .session()
        .and_then(|s| s.user.as_ref())
        .map(|u| u.id);

    let reply = app.assistant.search(query, user_id).await?;
    if reply.suggestions.is_empty() {
        println!("No suggestions found. Try a different query.");
        return Ok(());
    }

    for (i, s) in reply.suggestions.iter().enumerate() {
        println!(
            "{}",
            Color::Cyan.bold().paint(format!("{}. {}", i + 1, s.title))
        );
        println!("   {} - {}", s.start_time, s.end_time);
        if let Some(location) = &s.location {
            println!("   @ {}", location);
        }
        if let Some(budget) = &s.budget_estimate {
            println!("   budget: {}", budget);
        }
        if let Some(minutes) = s.travel_time_minutes {
            println!("   travel: ~{}m", minutes);
        }
        if !s.suggested_attendees.is_empty() {
            println!("   for: {}", s.suggested_attendees.join(", "));
        }
        if let Some(reasoning) = &s.reasoning {
            println!("   {}", Color::DarkGray.paint(reasoning.as_str()));
        }
    }
    Ok(())
}

// ----------------------------------------------------------------------
// Shopping list
// ----------------------------------------------------------------------

/// `/shopping`: list shopping items.
pub async fn shopping_list(app: &App) -> Result<()> {
    let items = app.api.list_shopping().await?;
    if items.is_empty() {
        println!("Shopping list is empty.");
        return Ok(());
    }

    for item in items {
        let mark = if item.is_bought { "[x]" } else { "[ ]" };
        println!("#{:<4} {} {}  ({})", item.id, mark, item.name, item.category);
    }
    Ok(())
}

/// `/shop`: add a shopping item.
pub async fn add_shopping(app: &App, name: &str, category: Option<&str>) -> Result<()> {
    let mut draft = ShoppingItemDraft::new(name);
    if let Some(category) = category {
        draft = draft.with_category(category);
    }
    let item = app.api.add_shopping_item(&draft).await?;
    println!("Added #{}: {}", item.id, item.name);
    Ok(())
}

/// `/buy`: flip an item's bought flag.
///
/// The flipped state is shown optimistically from the server echo; on
/// failure the whole list is refetched instead.
pub async fn toggle_bought(app: &App, item_id: i64) -> Result<()> {
    match app.api.toggle_bought(item_id).await {
        Ok(item) => {
            let state = if item.is_bought { "bought" } else { "not bought" };
            println!("{} is now {}", item.name, state);
            Ok(())
        }
        Err(e) => {
            eprintln!("Toggle failed ({}), refreshing list", e);
            shopping_list(app).await
        }
    }
}

// ----------------------------------------------------------------------
// To-dos
// ----------------------------------------------------------------------

/// `/todos`: list to-dos with assignee names.
pub async fn list_todos(app: &App) -> Result<()> {
    let (todos, users) = app.api.list_todos_with_users().await?;
    if todos.is_empty() {
        println!("No todos.");
        return Ok(());
    }

    for todo in todos {
        let mark = if todo.is_completed() { "[x]" } else { "[ ]" };
        let assignee = todo
            .assigned_to_user_id
            .and_then(|id| users.iter().find(|u| u.id == id))
            .map(|u| format!("  -> {}", u.name))
            .unwrap_or_default();
        let due = todo
            .due()
            .map(|d| format!("  (due {})", d.format("%Y-%m-%d")))
            .unwrap_or_default();
        println!("#{:<4} {} {}{}{}", todo.id, mark, todo.title, assignee, due);
    }
    Ok(())
}

/// `/todo`: add a to-do.
pub async fn add_todo(app: &App, title: &str) -> Result<()> {
    let todo = app.api.create_todo(&TodoDraft::new(title)).await?;
    println!("Added todo #{}: {}", todo.id, todo.title);
    Ok(())
}

/// `/done`: mark a to-do completed.
pub async fn complete_todo(app: &App, todo_id: i64) -> Result<()> {
    let todos = app.api.list_todos().await?;
    let Some(todo) = todos.into_iter().find(|t| t.id == todo_id) else {
        println!("No todo #{}", todo_id);
        return Ok(());
    };

    let mut draft = TodoDraft::new(todo.title.as_str());
    draft.description = todo.description.clone();
    draft.due_date = todo.due_date.clone();
    draft.assigned_to_user_id = todo.assigned_to_user_id;
    draft.reward_amount = todo.reward_amount;
    draft.status = "completed".to_string();

    let updated = app.api.update_todo(todo_id, &draft).await?;
    println!("Completed: {}", updated.title);
    Ok(())
}

// ----------------------------------------------------------------------
// Location search
// ----------------------------------------------------------------------

/// `/locate`: look up a location.
pub async fn locate(app: &App, query: &str) -> Result<()> {
    match app.geo.lookup(query).await? {
        Some(places) if !places.is_empty() => {
            for place in places {
                println!("  {}", place.display_name);
            }
        }
        Some(_) => println!("No matches."),
        None => println!("Lookup skipped (query too short or superseded)."),
    }
    Ok(())
}

// ----------------------------------------------------------------------
// Voice
// ----------------------------------------------------------------------

/// `/voice`: transcribe an audio file and create what it describes.
pub async fn voice(app: &App, path: &str) -> Result<()> {
    let audio = tokio::fs::read(path)
        .await
        .map_err(|e| FamcalError::Other(format!("Cannot read {}: {}", path, e)))?;
    let filename = std::path::Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("recording.webm");

    let reply = app.voice.process(&audio, filename).await?;

    if let Some(text) = &reply.text {
        println!("Heard: {}", text);
    }

    let Some(parsed) = reply.parsed_data else {
        println!("Nothing actionable found in the recording.");
        return Ok(());
    };
    if parsed.events.is_empty() && parsed.shopping_list.is_empty() && parsed.todos.is_empty() {
        println!("Nothing actionable found in the recording.");
        return Ok(());
    }

    let (events, roster) = tokio::join!(app.api.list_events(), app.api.list_users());
    let existing = events.unwrap_or_default();
    let roster = roster.unwrap_or_default();

    for event in &parsed.events {
        create_parsed_event(app, event, &existing, &roster).await?;
    }
    for item in &parsed.shopping_list {
        let draft = ShoppingItemDraft::new(item.name.as_str());
        app.api.add_shopping_item(&draft).await?;
        println!("Added to shopping list: {}", item.name);
    }
    for todo in &parsed.todos {
        create_parsed_todo(app, todo, &roster).await?;
    }
    Ok(())
}

// ----------------------------------------------------------------------
// Session
// ----------------------------------------------------------------------

async fn finish_login(app: &mut App, session: famcal_core::Session) -> Result<()> {
    app.api.set_session(Some(session.clone()));

    let session = match app.api.me().await {
        Ok(user) => session.with_user(user),
        Err(e) => {
            tracing::warn!("Could not resolve member identity: {}", e);
            session
        }
    };
    app.api.set_session(Some(session.clone()));
    app.session_store.save(&session)?;

    let who = session
        .user
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_else(|| "unknown member".to_string());
    println!("{}", Color::Green.paint(format!("Logged in as {}", who)));
    Ok(())
}

/// `/login`: exchange credentials for a session.
pub async fn login(app: &mut App, email: &str, password: &str) -> Result<()> {
    let session = app.api.login(email, password).await?;
    finish_login(app, session).await
}

/// `/dev`: development login by email alone.
pub async fn dev_login(app: &mut App, email: &str) -> Result<()> {
    let session = app.api.dev_login(email).await?;
    finish_login(app, session).await
}

/// `/logout`: drop the session.
pub async fn logout(app: &mut App) -> Result<()> {
    app.api.set_session(None);
    app.session_store.clear()?;
    println!("Logged out.");
    Ok(())
}

/// `/whoami`: show the active member.
pub async fn whoami(app: &App) -> Result<()> {
    match app.api.session() {
        Some(session) => match &session.user {
            Some(user) => {
                let travel = if user.travel_time_enabled() {
                    " (schedules travel time)"
                } else {
                    ""
                };
                println!("{} <{}> [{}]{}", user.name, user.email, user.role, travel);
            }
            None => println!("Logged in (identity not resolved)."),
        },
        None => println!("Not logged in. Use /login <email> <password> or /dev <email>."),
    }
    Ok(())
}
