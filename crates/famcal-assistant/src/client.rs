//! Assistant HTTP client
//!
//! Thin wrapper around the backend's natural-language endpoints. The
//! heavy lifting happens server-side; this client sends text and gets
//! structured items back.

use famcal_core::config::ApiConfig;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::{AssistantError, Result};
use crate::types::{InteractRequest, InteractResponse, SearchRequest, SearchResponse};

/// Client for the assistant endpoints
#[derive(Clone)]
pub struct AssistantClient {
    client: Client,
    base_url: String,
}

impl AssistantClient {
    /// Create a new assistant client.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            // assistant calls fan out to an LLM server-side; allow longer
            .timeout(std::time::Duration::from_secs(config.timeout_secs.max(60)))
            .build()
            .map_err(|e| AssistantError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Parse free text into structured events, shopping items and to-dos.
    pub async fn interact(&self, query: &str, user_id: Option<i64>) -> Result<InteractResponse> {
        let url = format!("{}/api/assistant/interact", self.base_url);

        debug!("Assistant interact: {:?}", query);

        let response = self
            .client
            .post(&url)
            .json(&InteractRequest {
                query: query.to_string(),
                user_id,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Assistant interact failed: {} - {}", status, body);
            return Err(AssistantError::ApiError(format!("{}: {}", status, body)));
        }

        let parsed: InteractResponse = serde_json::from_str(&body)
            .map_err(|e| AssistantError::ParseError(format!("{} - {}", e, body)))?;

        info!(
            "Assistant extracted {} events, {} shopping items, {} todos",
            parsed.events.len(),
            parsed.shopping_list.len(),
            parsed.todos.len()
        );

        Ok(parsed)
    }

    /// Ask for real-world event suggestions matching a query.
    pub async fn search(&self, query: &str, user_id: Option<i64>) -> Result<SearchResponse> {
        let url = format!("{}/api/assistant/search", self.base_url);

        debug!("Assistant search: {:?}", query);

        let response = self
            .client
            .post(&url)
            .json(&SearchRequest {
                query: query.to_string(),
                user_id,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Assistant search failed: {} - {}", status, body);
            return Err(AssistantError::ApiError(format!("{}: {}", status, body)));
        }

        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| AssistantError::ParseError(format!("{} - {}", e, body)))?;

        info!("Assistant returned {} suggestions", parsed.suggestions.len());

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ApiConfig {
        ApiConfig {
            base_url: server.uri(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_interact_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/assistant/interact"))
            .and(body_json(json!({"query": "milk and soccer at 5"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "events": [{
                    "title": "Soccer",
                    "date": "2025-03-01",
                    "start_time": "17:00",
                    "end_time": "18:00",
                    "attendees": ["Bob"]
                }],
                "shopping_items": [{"name": "Milk", "category": "Food"}],
                "chores": []
            })))
            .mount(&server)
            .await;

        let client = AssistantClient::new(&config_for(&server)).unwrap();
        let reply = client.interact("milk and soccer at 5", None).await.unwrap();

        assert_eq!(reply.events.len(), 1);
        assert_eq!(reply.shopping_list[0].name, "Milk");
        assert!(reply.events[0].time_range().is_some());
    }

    #[tokio::test]
    async fn test_search_returns_suggestions() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/assistant/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "suggestions": [{
                    "title": "Jazz night",
                    "start_time": "2025-03-08T19:00:00",
                    "end_time": "2025-03-08T22:00:00",
                    "budget_estimate": "$40",
                    "travel_time_minutes": 25,
                    "suggested_attendees": ["Alice"]
                }]
            })))
            .mount(&server)
            .await;

        let client = AssistantClient::new(&config_for(&server)).unwrap();
        let reply = client.search("live music this weekend", Some(1)).await.unwrap();

        assert_eq!(reply.suggestions.len(), 1);
        assert_eq!(reply.suggestions[0].travel_time_minutes, Some(25));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/assistant/interact"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let client = AssistantClient::new(&config_for(&server)).unwrap();
        let err = client.interact("hello", None).await.unwrap_err();
        assert!(matches!(err, AssistantError::ApiError(_)));
    }
}
