use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// One flight-search submission. Built per request, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: String, // YYYY-MM-DD
    pub adults: u32,
}

impl SearchParams {
    pub fn validate(&self) -> CoreResult<()> {
        if self.origin.trim().is_empty()
            || self.destination.trim().is_empty()
            || self.departure_date.trim().is_empty()
        {
            return Err(CoreError::ValidationError(
                "origin, destination and departure date are required".to_string(),
            ));
        }
        if self.origin.trim().len() < 2 || self.destination.trim().len() < 2 {
            return Err(CoreError::ValidationError(
                "origin and destination must be at least 2 characters".to_string(),
            ));
        }
        if !is_date_shaped(&self.departure_date) {
            return Err(CoreError::ValidationError(
                "departure date must use the YYYY-MM-DD format".to_string(),
            ));
        }
        if self.adults < 1 || self.adults > 9 {
            return Err(CoreError::ValidationError(
                "adult count must be between 1 and 9".to_string(),
            ));
        }
        Ok(())
    }
}

// Shape check only: digits and dashes in the right positions. Calendar
// validity is not enforced, so "2025-13-40" passes.
fn is_date_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0usize, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit())
}

/// Render a minutes count as the display duration, e.g. 125 -> "2h 5m".
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaggageAllowance {
    pub cabin: String,
    pub checked: String,
}

/// Normalized flight offering, produced either from a provider itinerary
/// or by the fallback generator. Immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRecord {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub stops: u32,
    pub price: f64,
    pub currency: String,
    pub date: String,
    pub class: String,
    pub seats_available: u32,
    pub baggage: BaggageAllowance,
}

/// Where a flight list actually came from. The API contract collapses this
/// to a single success shape, but the source stays visible internally.
#[derive(Debug)]
pub enum SearchOutcome {
    Provider(Vec<FlightRecord>),
    Mocked(Vec<FlightRecord>),
    Failed(String),
}

impl SearchOutcome {
    pub fn flights(&self) -> &[FlightRecord] {
        match self {
            SearchOutcome::Provider(data) | SearchOutcome::Mocked(data) => data,
            SearchOutcome::Failed(_) => &[],
        }
    }

    pub fn into_result(self) -> SearchResult {
        match self {
            SearchOutcome::Provider(data) | SearchOutcome::Mocked(data) => SearchResult {
                success: true,
                data,
                error: None,
            },
            SearchOutcome::Failed(reason) => SearchResult {
                success: false,
                data: Vec::new(),
                error: Some(reason),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub success: bool,
    pub data: Vec<FlightRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
