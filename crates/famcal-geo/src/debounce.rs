//! Debounced, superseding location lookups
//!
//! Typing fires a lookup per keystroke; only the latest may win. Every
//! call takes a fresh generation number, waits out the debounce, and
//! bails if a newer call has started. The check runs before issuing the
//! request and again before handing back results, so a slow response can
//! never overwrite a newer one. Picking a suggestion suppresses the
//! lookup its echo would otherwise trigger.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::nominatim::{GeoClient, Place};

/// Queries shorter than this never hit the network.
pub const MIN_QUERY_CHARS: usize = 3;

/// Debounced front end over [`GeoClient`]
#[derive(Clone)]
pub struct DebouncedSearch {
    client: GeoClient,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    suppressed: Arc<Mutex<Option<String>>>,
}

impl DebouncedSearch {
    pub fn new(client: GeoClient, debounce: Duration) -> Self {
        Self {
            client,
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
            suppressed: Arc::new(Mutex::new(None)),
        }
    }

    /// Record that the user picked a suggestion; the one lookup its echo
    /// triggers is skipped.
    pub fn note_selection(&self, text: &str) {
        *self.suppressed.lock().unwrap() = Some(text.to_string());
    }

    fn take_suppressed(&self, query: &str) -> bool {
        let mut guard = self.suppressed.lock().unwrap();
        if guard.as_deref() == Some(query) {
            *guard = None;
            return true;
        }
        false
    }

    /// Debounce, then search.
    ///
    /// Returns `Ok(None)` when the lookup was superseded by a newer one,
    /// the query is too short, or it matches a just-picked suggestion.
    pub async fn lookup(&self, query: &str) -> Result<Option<Vec<Place>>> {
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(None);
        }
        if self.take_suppressed(query) {
            debug!("Skipping lookup for just-selected value: {:?}", query);
            return Ok(None);
        }

        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.debounce).await;
        if self.generation.load(Ordering::SeqCst) != my_generation {
            debug!("Lookup superseded before dispatch: {:?}", query);
            return Ok(None);
        }

        let places = self.client.search(query).await?;

        if self.generation.load(Ordering::SeqCst) != my_generation {
            debug!("Discarding stale response for: {:?}", query);
            return Ok(None);
        }

        Ok(Some(places))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use famcal_core::config::GeocodeConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn search_for(server: &MockServer, debounce_ms: u64) -> DebouncedSearch {
        let client = GeoClient::new(&GeocodeConfig {
            base_url: server.uri(),
            debounce_ms,
            limit: 5,
        })
        .unwrap();
        DebouncedSearch::new(client, Duration::from_millis(debounce_ms))
    }

    fn place_response(name: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!([{"display_name": name}]))
    }

    #[tokio::test]
    async fn test_short_query_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(place_response("x"))
            .expect(0)
            .mount(&server)
            .await;

        let search = search_for(&server, 0).await;
        assert!(search.lookup("ab").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_lookup_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "second query"))
            .respond_with(place_response("Second"))
            .mount(&server)
            .await;

        let search = search_for(&server, 20).await;
        let (first, second) = tokio::join!(search.lookup("first query"), search.lookup("second query"));

        // the older lookup is superseded during its debounce window
        assert!(first.unwrap().is_none());
        let places = second.unwrap().unwrap();
        assert_eq!(places[0].display_name, "Second");
    }

    #[tokio::test]
    async fn test_selection_suppresses_exactly_one_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(place_response("Springfield, USA"))
            .expect(1)
            .mount(&server)
            .await;

        let search = search_for(&server, 0).await;
        search.note_selection("Springfield, USA");

        // the echo of the selection is skipped...
        assert!(search.lookup("Springfield, USA").await.unwrap().is_none());
        // ...but the user typing the same text again searches normally
        assert!(search.lookup("Springfield, USA").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_plain_lookup_returns_places() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(place_response("Park"))
            .mount(&server)
            .await;

        let search = search_for(&server, 1).await;
        let places = search.lookup("city park").await.unwrap().unwrap();
        assert_eq!(places.len(), 1);
    }
}
