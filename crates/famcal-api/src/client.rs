//! Household backend REST client
//!
//! One client per backend; the session travels with it explicitly rather
//! than being read out of ambient storage. All calls are plain JSON over
//! reqwest with per-call tracing.

use famcal_core::config::ApiConfig;
use famcal_core::{Event, EventDraft, Session, ShoppingItem, Todo, User};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::error::{ApiError, Result};
use crate::types::{ShoppingItemDraft, TodoDraft};

/// Client for the household backend REST API
#[derive(Clone)]
pub struct FamilyApi {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    session: Option<Session>,
}

impl FamilyApi {
    /// Create a new client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        info!("API client initialized for: {}", base_url);

        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    /// Attach an authenticated session.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Replace or clear the attached session.
    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    /// The attached session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when a session is present.
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.session {
            Some(session) => request.bearer_auth(&session.token),
            None => request,
        }
    }

    /// Check status and deserialize the JSON body.
    pub(crate) async fn parse_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthRequired);
        }
        if status == StatusCode::NOT_FOUND {
            let detail = response.text().await.unwrap_or_default();
            return Err(ApiError::NotFound(detail));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Backend request failed: {} - {}", status, detail);
            return Err(ApiError::Backend(format!("{}: {}", status, detail)));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))
    }

    /// Check status, discarding any body.
    pub(crate) async fn check_status(response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthRequired);
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("Backend request failed: {} - {}", status, detail);
            return Err(ApiError::Backend(format!("{}: {}", status, detail)));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Fetch the full event list.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let url = self.url("/api/events/");
        debug!("Fetching events from: {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        let events: Vec<Event> = Self::parse_json(response).await?;

        info!("Fetched {} events", events.len());
        Ok(events)
    }

    /// Fetch a single event.
    pub async fn get_event(&self, event_id: i64) -> Result<Event> {
        let url = self.url(&format!("/api/events/{}", event_id));
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::parse_json(response).await
    }

    /// Create an event; the server echo is the persisted record.
    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event> {
        let url = self.url("/api/events/");
        debug!("Creating event: {}", draft.title);

        let response = self
            .authorize(self.client.post(&url).json(draft))
            .send()
            .await?;
        let event: Event = Self::parse_json(response).await?;

        info!("Created event {}: {}", event.id, event.title);
        Ok(event)
    }

    /// Update an existing event.
    pub async fn update_event(&self, event_id: i64, draft: &EventDraft) -> Result<Event> {
        let url = self.url(&format!("/api/events/{}", event_id));
        debug!("Updating event: {}", event_id);

        let response = self
            .authorize(self.client.put(&url).json(draft))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Delete an event.
    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        let url = self.url(&format!("/api/events/{}", event_id));
        debug!("Deleting event: {}", event_id);

        let response = self.authorize(self.client.delete(&url)).send().await?;
        Self::check_status(response).await?;

        info!("Deleted event {}", event_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Users (family roster)
    // ------------------------------------------------------------------

    /// Fetch the family roster.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let url = self.url("/api/users/");
        let response = self.authorize(self.client.get(&url)).send().await?;
        let users: Vec<User> = Self::parse_json(response).await?;

        debug!("Fetched {} family members", users.len());
        Ok(users)
    }

    /// Fetch a single family member.
    pub async fn get_user(&self, user_id: i64) -> Result<User> {
        let url = self.url(&format!("/api/users/{}", user_id));
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::parse_json(response).await
    }

    /// Add a family member (admin settings surface).
    pub async fn create_user(&self, payload: &crate::types::RegisterPayload) -> Result<User> {
        let url = self.url("/api/users/");
        debug!("Creating family member: {}", payload.name);

        let response = self
            .authorize(self.client.post(&url).json(payload))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Update a family member (settings surface; the preferences bag is
    /// passed through as-is).
    pub async fn update_user(&self, user_id: i64, user: &User) -> Result<User> {
        let url = self.url(&format!("/api/users/{}", user_id));
        let response = self
            .authorize(self.client.put(&url).json(user))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    // ------------------------------------------------------------------
    // Shopping list
    // ------------------------------------------------------------------

    /// Fetch the shopping list.
    pub async fn list_shopping(&self) -> Result<Vec<ShoppingItem>> {
        let url = self.url("/api/shopping/");
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::parse_json(response).await
    }

    /// Add a shopping item.
    pub async fn add_shopping_item(&self, draft: &ShoppingItemDraft) -> Result<ShoppingItem> {
        let url = self.url("/api/shopping/");
        debug!("Adding shopping item: {}", draft.name);

        let response = self
            .authorize(self.client.post(&url).json(draft))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Update a shopping item.
    pub async fn update_shopping_item(
        &self,
        item_id: i64,
        draft: &ShoppingItemDraft,
    ) -> Result<ShoppingItem> {
        let url = self.url(&format!("/api/shopping/{}", item_id));
        let response = self
            .authorize(self.client.put(&url).json(draft))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Delete a shopping item.
    pub async fn delete_shopping_item(&self, item_id: i64) -> Result<()> {
        let url = self.url(&format!("/api/shopping/{}", item_id));
        let response = self.authorize(self.client.delete(&url)).send().await?;
        Self::check_status(response).await
    }

    /// Flip an item's bought flag; returns the updated item.
    pub async fn toggle_bought(&self, item_id: i64) -> Result<ShoppingItem> {
        let url = self.url(&format!("/api/shopping/{}/toggle", item_id));
        debug!("Toggling shopping item: {}", item_id);

        let response = self.authorize(self.client.post(&url)).send().await?;
        Self::parse_json(response).await
    }

    // ------------------------------------------------------------------
    // To-dos
    // ------------------------------------------------------------------

    /// Fetch the to-do list.
    pub async fn list_todos(&self) -> Result<Vec<Todo>> {
        let url = self.url("/api/todos/");
        let response = self.authorize(self.client.get(&url)).send().await?;
        Self::parse_json(response).await
    }

    /// Create a to-do.
    pub async fn create_todo(&self, draft: &TodoDraft) -> Result<Todo> {
        let url = self.url("/api/todos/");
        debug!("Creating todo: {}", draft.title);

        let response = self
            .authorize(self.client.post(&url).json(draft))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Update a to-do (status flips go through here).
    pub async fn update_todo(&self, todo_id: i64, draft: &TodoDraft) -> Result<Todo> {
        let url = self.url(&format!("/api/todos/{}", todo_id));
        let response = self
            .authorize(self.client.put(&url).json(draft))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Delete a to-do.
    pub async fn delete_todo(&self, todo_id: i64) -> Result<()> {
        let url = self.url(&format!("/api/todos/{}", todo_id));
        let response = self.authorize(self.client.delete(&url)).send().await?;
        Self::check_status(response).await
    }

    /// Fetch the roster and to-dos together, as the dashboard does.
    pub async fn list_todos_with_users(&self) -> Result<(Vec<Todo>, Vec<User>)> {
        let (todos, users) = tokio::join!(self.list_todos(), self.list_users());
        Ok((todos?, users?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famcal_core::config::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ApiConfig {
        ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        }
    }

    fn sample_event() -> serde_json::Value {
        json!({
            "id": 1,
            "title": "Soccer practice",
            "start_time": "2025-03-01T10:00:00",
            "end_time": "2025-03-01T11:00:00",
            "category": "Hobby",
            "attendees": []
        })
    }

    #[test]
    fn test_client_creation_strips_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            timeout_secs: 5,
        };
        let api = FamilyApi::new(&config).unwrap();
        assert_eq!(api.url("/api/events/"), "http://localhost:8000/api/events/");
    }

    #[tokio::test]
    async fn test_list_events() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([sample_event()])))
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server)).unwrap();
        let events = api.list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Soccer practice");
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events/"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server))
            .unwrap()
            .with_session(Session::new("tok-123"));
        api.list_events().await.unwrap();
    }

    #[tokio::test]
    async fn test_create_event_sends_draft_shape() {
        let server = MockServer::start().await;
        let draft = EventDraft::new(
            "Dentist",
            famcal_core::time::parse_utc("2025-03-01T09:00:00Z").unwrap(),
            famcal_core::time::parse_utc("2025-03-01T10:00:00Z").unwrap(),
        )
        .with_attendees(vec![2]);

        Mock::given(method("POST"))
            .and(path("/api/events/"))
            .and(body_partial_json(json!({
                "title": "Dentist",
                "category": "General",
                "attendee_ids": [2]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_event()))
            .expect(1)
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server)).unwrap();
        api.create_event(&draft).await.unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_required() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/events/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server)).unwrap();
        match api.list_events().await {
            Err(ApiError::AuthRequired) => {}
            other => panic!("expected AuthRequired, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_toggle_bought() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/shopping/4/toggle"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4, "name": "Milk", "category": "Food", "is_bought": true
            })))
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server)).unwrap();
        let item = api.toggle_bought(4).await.unwrap();
        assert!(item.is_bought);
    }

    #[tokio::test]
    async fn test_server_error_surfaces_detail() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/events/9"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let api = FamilyApi::new(&config_for(&server)).unwrap();
        let err = api.delete_event(9).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
