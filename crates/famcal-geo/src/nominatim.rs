//! OpenStreetMap Nominatim search client

use famcal_core::config::GeocodeConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{GeoError, Result};

/// A location suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub display_name: String,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub lon: Option<String>,
    #[serde(default)]
    pub place_id: Option<i64>,
    #[serde(rename = "type", default)]
    pub place_type: Option<String>,
}

/// Nominatim-compatible geocoding client
#[derive(Clone)]
pub struct GeoClient {
    client: Client,
    base_url: String,
    limit: u32,
}

impl GeoClient {
    /// Create a new geocoding client.
    pub fn new(config: &GeocodeConfig) -> Result<Self> {
        // Nominatim's usage policy requires an identifying User-Agent
        let client = Client::builder()
            .user_agent(concat!("famcal/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| GeoError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
        })
    }

    /// Free-text location search.
    pub async fn search(&self, query: &str) -> Result<Vec<Place>> {
        let url = format!("{}/search", self.base_url);

        debug!("Geocoding lookup: {:?}", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("addressdetails", "1"),
                ("limit", &self.limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeoError::ApiError(format!("{}: {}", status, body)));
        }

        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|e| GeoError::ParseError(e.to_string()))?;

        info!("Geocoding returned {} places for {:?}", places.len(), query);
        Ok(places)
    }
}
