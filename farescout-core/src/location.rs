use std::sync::Arc;

use serde::Serialize;

use crate::provider::{LocationCandidate, ProviderClient};

/// Provider-specific identifiers for one search endpoint. Resolved per call
/// and owned by the orchestrator for the duration of that search; nothing is
/// cached between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationRef {
    pub sky_id: String,
    pub entity_id: String,
    pub display_name: String,
}

fn known(sky_id: &str, entity_id: &str, display_name: &str) -> LocationRef {
    LocationRef {
        sky_id: sky_id.to_string(),
        entity_id: entity_id.to_string(),
        display_name: display_name.to_string(),
    }
}

/// Static table of major city and airport-code mappings. A hit here skips
/// the remote lookup entirely.
pub fn static_lookup(query: &str) -> Option<LocationRef> {
    let hit = match query.trim().to_uppercase().as_str() {
        "NEW YORK" => known("NYCA-sky", "27537542", "New York"),
        "JFK" => known("NYCA-sky", "27537542", "New York JFK"),
        "LONDON" => known("LOND-sky", "27539733", "London"),
        "LHR" => known("LOND-sky", "27539733", "London Heathrow"),
        "LOS ANGELES" | "LAX" => known("LAXA-sky", "27539570", "Los Angeles"),
        "PARIS" => known("PARI-sky", "27539698", "Paris"),
        "CDG" => known("PARI-sky", "27539698", "Paris CDG"),
        "TOKYO" => known("TYOA-sky", "27539999", "Tokyo"),
        "DUBAI" | "DXB" => known("DXBA-sky", "27536927", "Dubai"),
        "CHICAGO" => known("CHIA-sky", "27536720", "Chicago"),
        "ORD" => known("CHIA-sky", "27536720", "Chicago O'Hare"),
        _ => return None,
    };
    Some(hit)
}

/// Maps free-text origin/destination input to provider location identifiers:
/// static table first, then each configured lookup endpoint in order.
pub struct LocationResolver {
    provider: Arc<dyn ProviderClient>,
    endpoints: Vec<String>,
}

impl LocationResolver {
    pub fn new(provider: Arc<dyn ProviderClient>, endpoints: Vec<String>) -> Self {
        Self { provider, endpoints }
    }

    /// Resolve a query to a location. Absence is a normal outcome, not an
    /// error: endpoint failures and empty candidate lists just move on to
    /// the next endpoint, and exhaustion returns None.
    pub async fn resolve(&self, query: &str) -> Option<LocationRef> {
        if let Some(hit) = static_lookup(query) {
            return Some(hit);
        }

        for endpoint in &self.endpoints {
            match self.provider.lookup_locations(endpoint, query.trim()).await {
                Ok(candidates) => {
                    if let Some(first) = candidates.into_iter().next() {
                        return Some(from_candidate(first, query));
                    }
                }
                Err(err) => {
                    tracing::debug!(
                        endpoint = endpoint.as_str(),
                        error = %err,
                        "location lookup failed, trying next endpoint"
                    );
                }
            }
        }

        None
    }
}

fn from_candidate(candidate: LocationCandidate, query: &str) -> LocationRef {
    let place_id = candidate.place_id;
    LocationRef {
        sky_id: candidate.sky_id.or_else(|| place_id.clone()).unwrap_or_default(),
        entity_id: candidate.entity_id.or(place_id).unwrap_or_default(),
        display_name: candidate
            .presentation
            .and_then(|p| p.title)
            .or(candidate.name)
            .unwrap_or_else(|| query.trim().to_string()),
    }
}
