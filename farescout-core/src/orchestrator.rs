use std::sync::Arc;

use rand::Rng;

use crate::fallback::mock_flights;
use crate::location::{LocationRef, LocationResolver};
use crate::provider::{Itinerary, ItineraryQuery, ProviderClient};
use crate::search::{format_duration, BaggageAllowance, FlightRecord, SearchOutcome, SearchParams};

/// Linear search pipeline: resolve both endpoints, query the aggregator,
/// transform its itineraries, or fall back to generated flights. Every
/// caught failure path still produces a flight list; only invalid input
/// yields the Failed arm.
pub struct FlightSearchOrchestrator {
    provider: Arc<dyn ProviderClient>,
    resolver: LocationResolver,
    currency: String,
    cabin_class: String,
}

impl FlightSearchOrchestrator {
    pub fn new(
        provider: Arc<dyn ProviderClient>,
        lookup_endpoints: Vec<String>,
        currency: impl Into<String>,
        cabin_class: impl Into<String>,
    ) -> Self {
        Self {
            resolver: LocationResolver::new(provider.clone(), lookup_endpoints),
            provider,
            currency: currency.into(),
            cabin_class: cabin_class.into(),
        }
    }

    pub async fn search(&self, params: &SearchParams) -> SearchOutcome {
        if let Err(err) = params.validate() {
            return SearchOutcome::Failed(err.to_string());
        }

        let origin = self.resolver.resolve(&params.origin).await;
        let destination = self.resolver.resolve(&params.destination).await;
        let (origin, destination) = match (origin, destination) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => {
                tracing::info!(
                    origin = params.origin.as_str(),
                    destination = params.destination.as_str(),
                    "location resolution missed, serving generated flights"
                );
                return self.mocked(params);
            }
        };

        let query = ItineraryQuery {
            origin: origin.clone(),
            destination: destination.clone(),
            date: params.departure_date.clone(),
            adults: params.adults,
            currency: self.currency.clone(),
            cabin_class: self.cabin_class.clone(),
        };

        match self.provider.search_itineraries(&query).await {
            Ok(itineraries) if !itineraries.is_empty() => {
                let flights = itineraries
                    .into_iter()
                    .enumerate()
                    .map(|(index, itinerary)| {
                        self.transform(index, itinerary, &origin, &destination, params)
                    })
                    .collect();
                SearchOutcome::Provider(flights)
            }
            Ok(_) => {
                tracing::info!("provider returned no itineraries, serving generated flights");
                self.mocked(params)
            }
            Err(err) => {
                tracing::warn!(error = %err, "provider search failed, serving generated flights");
                self.mocked(params)
            }
        }
    }

    fn mocked(&self, params: &SearchParams) -> SearchOutcome {
        SearchOutcome::Mocked(mock_flights(
            &params.origin,
            &params.destination,
            &params.departure_date,
            params.adults,
        ))
    }

    fn transform(
        &self,
        index: usize,
        itinerary: Itinerary,
        origin: &LocationRef,
        destination: &LocationRef,
        params: &SearchParams,
    ) -> FlightRecord {
        let leg = itinerary.legs.into_iter().next().unwrap_or_default();

        let price = itinerary
            .price
            .and_then(|p| p.raw.or_else(|| p.formatted.and_then(|f| f.parse().ok())))
            .unwrap_or(0.0);
        let stops = leg.stop_count.unwrap_or(0);
        let airline = leg
            .carriers
            .and_then(|c| c.marketing.into_iter().next())
            .and_then(|carrier| carrier.name)
            .unwrap_or_else(|| "Unknown Airline".to_string());
        let flight_number = leg
            .segments
            .into_iter()
            .next()
            .and_then(|segment| segment.flight_number)
            .unwrap_or_else(|| "N/A".to_string());

        FlightRecord {
            id: itinerary
                .id
                .unwrap_or_else(|| format!("flight_{}", index + 1)),
            airline,
            flight_number,
            origin: leg
                .origin
                .and_then(|o| o.display_code)
                .unwrap_or_else(|| origin.sky_id.clone()),
            destination: leg
                .destination
                .and_then(|d| d.display_code)
                .unwrap_or_else(|| destination.sky_id.clone()),
            departure_time: clock_time(leg.departure.as_deref()),
            arrival_time: clock_time(leg.arrival.as_deref()),
            duration: leg
                .duration_in_minutes
                .map(format_duration)
                .unwrap_or_else(|| "N/A".to_string()),
            stops,
            price,
            currency: self.currency.clone(),
            date: params.departure_date.clone(),
            class: "Economy".to_string(),
            // The aggregator does not expose seat counts.
            seats_available: rand::thread_rng().gen_range(1..=50),
            baggage: BaggageAllowance {
                cabin: "1 personal item".to_string(),
                checked: if stops == 0 { "2 bags" } else { "1 bag" }.to_string(),
            },
        }
    }
}

/// Render a provider timestamp as 24-hour HH:MM, "N/A" when absent or
/// unparseable.
fn clock_time(timestamp: Option<&str>) -> String {
    let Some(raw) = timestamp else {
        return "N/A".to_string();
    };
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.format("%H:%M").to_string())
        .or_else(|_| {
            chrono::DateTime::parse_from_rfc3339(raw).map(|dt| dt.format("%H:%M").to_string())
        })
        .unwrap_or_else(|_| "N/A".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{LocationCandidate, ProviderError};
    use async_trait::async_trait;

    enum ProviderScript {
        Unreachable,
        NoItineraries,
        Itineraries(String),
    }

    struct ScriptedProvider {
        script: ProviderScript,
        resolvable: bool,
    }

    #[async_trait]
    impl ProviderClient for ScriptedProvider {
        async fn lookup_locations(
            &self,
            _endpoint: &str,
            query: &str,
        ) -> Result<Vec<LocationCandidate>, ProviderError> {
            if !self.resolvable {
                return Err(ProviderError::Transport("no route to host".to_string()));
            }
            let candidate = serde_json::from_str(&format!(
                r#"{{ "skyId": "{q}-sky", "entityId": "e-{q}", "presentation": {{ "title": "{q}" }} }}"#,
                q = query
            ))
            .unwrap();
            Ok(vec![candidate])
        }

        async fn search_itineraries(
            &self,
            _query: &ItineraryQuery,
        ) -> Result<Vec<Itinerary>, ProviderError> {
            match &self.script {
                ProviderScript::Unreachable => {
                    Err(ProviderError::Transport("no route to host".to_string()))
                }
                ProviderScript::NoItineraries => Ok(Vec::new()),
                ProviderScript::Itineraries(json) => Ok(serde_json::from_str(json).unwrap()),
            }
        }
    }

    fn orchestrator(script: ProviderScript, resolvable: bool) -> FlightSearchOrchestrator {
        FlightSearchOrchestrator::new(
            Arc::new(ScriptedProvider { script, resolvable }),
            vec!["https://one.example/search".to_string()],
            "USD",
            "economy",
        )
    }

    fn params() -> SearchParams {
        SearchParams {
            origin: "Mombasa".to_string(),
            destination: "Nairobi".to_string(),
            departure_date: "2099-01-01".to_string(),
            adults: 2,
        }
    }

    #[tokio::test]
    async fn test_invalid_params_fail_before_any_resolution() {
        let orchestrator = orchestrator(ProviderScript::Unreachable, false);
        let mut bad = params();
        bad.origin = String::new();

        match orchestrator.search(&bad).await {
            SearchOutcome::Failed(reason) => assert!(reason.contains("required")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unresolvable_locations_fall_back_to_generated() {
        let orchestrator = orchestrator(ProviderScript::Unreachable, false);

        match orchestrator.search(&params()).await {
            SearchOutcome::Mocked(flights) => assert_eq!(flights.len(), 10),
            other => panic!("expected Mocked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_generated() {
        let orchestrator = orchestrator(ProviderScript::Unreachable, true);

        match orchestrator.search(&params()).await {
            SearchOutcome::Mocked(flights) => assert_eq!(flights.len(), 10),
            other => panic!("expected Mocked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_zero_itineraries_fall_back_to_generated() {
        let orchestrator = orchestrator(ProviderScript::NoItineraries, true);

        match orchestrator.search(&params()).await {
            SearchOutcome::Mocked(flights) => assert_eq!(flights.len(), 10),
            other => panic!("expected Mocked, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_itineraries_are_transformed_into_flight_records() {
        let itineraries = r#"[{
            "id": "it_77",
            "legs": [{
                "origin": { "displayCode": "MBA" },
                "destination": { "displayCode": "NBO" },
                "departure": "2099-01-01T08:15:00",
                "arrival": "2099-01-01T09:20:00",
                "durationInMinutes": 125,
                "stopCount": 1,
                "carriers": { "marketing": [{ "name": "Kenya Airways" }] },
                "segments": [{ "flightNumber": "412" }]
            }],
            "price": { "raw": 118.5, "formatted": "$119" }
        }]"#;
        let orchestrator = orchestrator(ProviderScript::Itineraries(itineraries.to_string()), true);

        let outcome = orchestrator.search(&params()).await;
        let SearchOutcome::Provider(flights) = outcome else {
            panic!("expected Provider outcome");
        };
        assert_eq!(flights.len(), 1);
        let flight = &flights[0];
        assert_eq!(flight.id, "it_77");
        assert_eq!(flight.airline, "Kenya Airways");
        assert_eq!(flight.flight_number, "412");
        assert_eq!(flight.origin, "MBA");
        assert_eq!(flight.destination, "NBO");
        assert_eq!(flight.departure_time, "08:15");
        assert_eq!(flight.arrival_time, "09:20");
        assert_eq!(flight.duration, "2h 5m");
        assert_eq!(flight.stops, 1);
        assert_eq!(flight.price, 118.5);
        assert_eq!(flight.currency, "USD");
        assert_eq!(flight.baggage.checked, "1 bag");
        assert!((1..=50).contains(&flight.seats_available));
    }

    #[tokio::test]
    async fn test_sparse_itinerary_uses_fallback_literals() {
        let orchestrator = orchestrator(
            ProviderScript::Itineraries(r#"[{ "legs": [{}] }]"#.to_string()),
            true,
        );

        let outcome = orchestrator.search(&params()).await;
        let SearchOutcome::Provider(flights) = outcome else {
            panic!("expected Provider outcome");
        };
        let flight = &flights[0];
        assert_eq!(flight.id, "flight_1");
        assert_eq!(flight.airline, "Unknown Airline");
        assert_eq!(flight.flight_number, "N/A");
        assert_eq!(flight.departure_time, "N/A");
        assert_eq!(flight.duration, "N/A");
        assert_eq!(flight.price, 0.0);
        assert_eq!(flight.stops, 0);
        assert_eq!(flight.baggage.checked, "2 bags");
        // Resolved identifiers back-fill the missing display codes.
        assert_eq!(flight.origin, "Mombasa-sky");
        assert_eq!(flight.destination, "Nairobi-sky");
    }

    #[tokio::test]
    async fn test_end_to_end_unreachable_provider_prices_scale_with_party() {
        let orchestrator = orchestrator(ProviderScript::Unreachable, false);

        let result = orchestrator.search(&params()).await.into_result();
        assert!(result.success);
        assert_eq!(result.data.len(), 10);
        assert!(result
            .data
            .windows(2)
            .all(|pair| pair[0].price <= pair[1].price));
        for flight in &result.data {
            assert_eq!(flight.price % 2.0, 0.0, "price must scale with adults=2");
        }
    }
}
