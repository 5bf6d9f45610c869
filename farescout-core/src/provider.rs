use async_trait::async_trait;
use serde::Deserialize;

use crate::location::LocationRef;

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("response decode failed: {0}")]
    Decode(String),
}

/// One-way itinerary query against the aggregator.
#[derive(Debug, Clone)]
pub struct ItineraryQuery {
    pub origin: LocationRef,
    pub destination: LocationRef,
    pub date: String,
    pub adults: u32,
    pub currency: String,
    pub cabin_class: String,
}

#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Look up location candidates for a free-text query against a single
    /// lookup endpoint.
    async fn lookup_locations(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<Vec<LocationCandidate>, ProviderError>;

    /// Search itineraries between two resolved locations.
    async fn search_itineraries(
        &self,
        query: &ItineraryQuery,
    ) -> Result<Vec<Itinerary>, ProviderError>;
}

// ============================================================================
// Aggregator wire models
// ============================================================================
// Field names follow the provider's JSON. Everything is optional because the
// shape varies across endpoint versions.

#[derive(Debug, Clone, Deserialize)]
pub struct LocationCandidate {
    #[serde(rename = "skyId")]
    pub sky_id: Option<String>,
    #[serde(rename = "entityId")]
    pub entity_id: Option<String>,
    #[serde(rename = "PlaceId")]
    pub place_id: Option<String>,
    pub presentation: Option<Presentation>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Presentation {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlightSearchResponse {
    pub data: Option<SearchData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub itineraries: Vec<Itinerary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Itinerary {
    pub id: Option<String>,
    #[serde(default)]
    pub legs: Vec<Leg>,
    pub price: Option<ItineraryPrice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub origin: Option<LegEndpoint>,
    pub destination: Option<LegEndpoint>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub duration_in_minutes: Option<i64>,
    pub stop_count: Option<u32>,
    pub carriers: Option<Carriers>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegEndpoint {
    pub display_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Carriers {
    #[serde(default)]
    pub marketing: Vec<Carrier>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Carrier {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub flight_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryPrice {
    pub raw: Option<f64>,
    pub formatted: Option<String>,
}
