// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Remote flight data from the AviationStack API.
//!
//! The desktop app runs on seed data by default; this client is only used
//! when live data is enabled. Responses are mapped leniently: missing gates
//! and terminals become "N/A", missing names and codes become empty strings,
//! and records without airline, flight number or both cities are dropped.

mod mapping;

pub use mapping::{complete, map_flight, merge_preferred, time_to_event, ApiFlight};

use std::time::Duration;

use chrono::Utc;
use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::flight::Flight;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.aviationstack.com/v1";
/// Environment variable holding the API key; takes precedence over config.
pub const API_KEY_ENV: &str = "AVIATIONSTACK_API_KEY";
/// Maximum number of flights returned.
pub const FLIGHT_LIMIT: usize = 5;
/// Airline that is fetched separately when the first page lacks it.
pub const PREFERRED_AIRLINE: &str = "Malaysia Airlines";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no API key configured (set AVIATIONSTACK_API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Resolve the API key from the environment first, then from config.
#[must_use]
pub fn resolve_api_key(config_key: Option<&str>) -> Option<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.is_empty() {
            return Some(key);
        }
    }
    config_key.map(str::to_string).filter(|s| !s.is_empty())
}

/// Configuration for [`FlightService`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    data: Option<serde_json::Value>,
}

/// Parse a `{data: [...]}` body into API records, skipping elements that do not parse.
pub fn parse_response(body: &str) -> Result<Vec<ApiFlight>, FetchError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

    let Some(serde_json::Value::Array(items)) = response.data else {
        return Err(FetchError::InvalidResponse(
            "missing `data` array".to_string(),
        ));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ApiFlight>(item) {
            Ok(flight) => Some(flight),
            Err(e) => {
                warn!("Skipping malformed flight record: {}", e);
                None
            }
        })
        .collect())
}

/// Client for the flights endpoint.
#[derive(Debug, Clone)]
pub struct FlightService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl FlightService {
    pub fn new(config: ServiceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn request(&self, extra: &[(&str, &str)]) -> Result<Vec<ApiFlight>, FetchError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(FetchError::MissingApiKey)?;

        let mut query: Vec<(&str, &str)> = vec![("access_key", api_key)];
        query.extend_from_slice(extra);

        let response = self
            .client
            .get(format!("{}/flights", self.config.base_url))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("API response not OK: {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }

    /// Fetch up to [`FLIGHT_LIMIT`] flights, making sure the preferred airline
    /// is included when the API has one.
    pub async fn fetch_flights(&self) -> Result<Vec<Flight>, FetchError> {
        info!("Fetching flights from AviationStack...");
        let limit = FLIGHT_LIMIT.to_string();
        let now = Utc::now();

        let flights: Vec<Flight> = self
            .request(&[("limit", limit.as_str())])
            .await?
            .iter()
            .map(|f| map_flight(f, now))
            .filter(complete)
            .collect();

        let has_preferred = flights
            .iter()
            .any(|f| f.airline.to_lowercase().contains(&PREFERRED_AIRLINE.to_lowercase()));

        let preferred = if has_preferred {
            None
        } else {
            debug!("No {} flight in first page, requesting one", PREFERRED_AIRLINE);
            match self
                .request(&[("limit", "1"), ("airline_name", PREFERRED_AIRLINE)])
                .await
            {
                Ok(records) => records.first().map(|f| map_flight(f, now)),
                Err(e) => {
                    warn!("Follow-up request for {} failed: {}", PREFERRED_AIRLINE, e);
                    None
                }
            }
        };

        let flights = merge_preferred(flights, preferred);
        info!("Fetched {} flights", flights.len());
        Ok(flights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_data_is_rejected() {
        assert!(matches!(
            parse_response(r#"{"error": {"code": "invalid_access_key"}}"#),
            Err(FetchError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response(r#"{"data": {"not": "a list"}}"#),
            Err(FetchError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_response("not json"),
            Err(FetchError::InvalidResponse(_))
        ));
    }

    #[test]
    fn malformed_elements_are_skipped() {
        let body = r#"{"data": [
            {"airline": {"name": "AirAsia"}, "flight": {"iata": "AK6102"}},
            {"airline": "not an object"}
        ]}"#;
        let records = parse_response(body).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let service = FlightService::new(ServiceConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            service.fetch_flights().await,
            Err(FetchError::MissingApiKey)
        ));
    }
}
