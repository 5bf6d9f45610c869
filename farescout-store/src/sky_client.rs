use async_trait::async_trait;
use serde_json::Value;

use farescout_core::provider::{
    FlightSearchResponse, Itinerary, ItineraryQuery, LocationCandidate, ProviderClient,
    ProviderError,
};

use crate::app_config::ProviderConfig;

/// HTTP client for the flight aggregator. Carries the two static auth
/// headers on every request; no retries and no request timeout (a hung
/// upstream call is not bounded here).
pub struct SkyProviderClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_host: String,
}

impl SkyProviderClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
        }
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.api_host)
    }
}

#[async_trait]
impl ProviderClient for SkyProviderClient {
    async fn lookup_locations(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<Vec<LocationCandidate>, ProviderError> {
        let response = self
            .authed(self.http.get(endpoint))
            .query(&[("query", query), ("locale", "en-US")])
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))?;
        Ok(candidates_from_body(body))
    }

    async fn search_itineraries(
        &self,
        query: &ItineraryQuery,
    ) -> Result<Vec<Itinerary>, ProviderError> {
        let url = format!("{}/flights/searchFlights", self.base_url);
        let adults = query.adults.to_string();

        tracing::debug!(
            origin = query.origin.sky_id.as_str(),
            destination = query.destination.sky_id.as_str(),
            date = query.date.as_str(),
            "querying provider itineraries"
        );

        let response = self
            .authed(self.http.get(&url))
            .query(&[
                ("originSkyId", query.origin.sky_id.as_str()),
                ("destinationSkyId", query.destination.sky_id.as_str()),
                ("originEntityId", query.origin.entity_id.as_str()),
                ("destinationEntityId", query.destination.entity_id.as_str()),
                ("date", query.date.as_str()),
                ("adults", adults.as_str()),
                ("currency", query.currency.as_str()),
                ("cabinClass", query.cabin_class.as_str()),
            ])
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let body: FlightSearchResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))?;
        Ok(body.data.map(|data| data.itineraries).unwrap_or_default())
    }
}

// The lookup endpoints disagree on shape: some wrap candidates in a `data`
// array, others return a bare array. Candidates that fail to decode are
// dropped rather than failing the whole lookup.
fn candidates_from_body(body: Value) -> Vec<LocationCandidate> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect()
}
