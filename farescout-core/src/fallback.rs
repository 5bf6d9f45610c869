use std::cmp::Ordering;

use rand::Rng;

use crate::search::{BaggageAllowance, FlightRecord};

const AIRLINES: [&str; 6] = ["Delta", "United", "American", "Southwest", "JetBlue", "Alaska"];

/// Derive an airport-style code for generated flights. 3-character input
/// passes through uppercased; unmapped city names fall back to their first
/// three characters.
pub fn city_code(input: &str) -> String {
    let upper = input.trim().to_uppercase();
    if upper.chars().count() == 3 {
        return upper;
    }
    match upper.as_str() {
        "NAIROBI" => "NBO",
        "MOMBASA" => "MBA",
        "NEW YORK" => "JFK",
        "LOS ANGELES" => "LAX",
        "CHICAGO" => "ORD",
        "MIAMI" => "MIA",
        "SAN FRANCISCO" => "SFO",
        "SEATTLE" => "SEA",
        "BOSTON" => "BOS",
        "DENVER" => "DEN",
        "LONDON" => "LHR",
        "PARIS" => "CDG",
        "DUBAI" => "DXB",
        "CAPE TOWN" => "CPT",
        _ => return upper.chars().take(3).collect(),
    }
    .to_string()
}

/// Generate the fallback flight list: shape-stable, value-randomized.
/// Always exactly 10 records, sorted ascending by price. Tests assert on
/// ranges and invariants, never literal values.
pub fn mock_flights(origin: &str, destination: &str, date: &str, adults: u32) -> Vec<FlightRecord> {
    let origin_code = city_code(origin);
    let destination_code = city_code(destination);
    let mut rng = rand::thread_rng();

    let mut flights: Vec<FlightRecord> = (0..10)
        .map(|i| {
            let airline = AIRLINES[rng.gen_range(0..AIRLINES.len())];
            let base_price = rng.gen_range(150u32..650);
            let duration_hours = rng.gen_range(2u32..=6);
            // Roughly 40% nonstop, the rest split between one and two stops.
            let stops = if rng.gen_bool(0.4) {
                0
            } else if rng.gen_bool(0.5) {
                1
            } else {
                2
            };
            let departure_hour = rng.gen_range(4u32..24);
            let arrival_hour = (departure_hour + duration_hours) % 24;

            FlightRecord {
                id: format!("flight_{}", i + 1),
                airline: airline.to_string(),
                flight_number: format!(
                    "{}{}",
                    airline[..2].to_uppercase(),
                    rng.gen_range(1000..10000)
                ),
                origin: origin_code.clone(),
                destination: destination_code.clone(),
                departure_time: format!("{:02}:{}", departure_hour, half_hour(&mut rng)),
                arrival_time: format!("{:02}:{}", arrival_hour, half_hour(&mut rng)),
                duration: format!("{}h {}m", duration_hours, rng.gen_range(0..60)),
                stops,
                price: f64::from(base_price * adults),
                currency: "USD".to_string(),
                date: date.to_string(),
                class: "Economy".to_string(),
                seats_available: rng.gen_range(1..=50),
                baggage: BaggageAllowance {
                    cabin: "1 personal item".to_string(),
                    checked: if stops == 0 { "2 bags" } else { "1 bag" }.to_string(),
                },
            }
        })
        .collect();

    flights.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
    flights
}

fn half_hour(rng: &mut impl Rng) -> &'static str {
    if rng.gen_bool(0.5) {
        "00"
    } else {
        "30"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_code_table_and_fallbacks() {
        assert_eq!(city_code("Mombasa"), "MBA");
        assert_eq!(city_code("NAIROBI"), "NBO");
        assert_eq!(city_code("jfk"), "JFK");
        assert_eq!(city_code("Cape Town"), "CPT");
        // Unmapped names truncate to their first three characters.
        assert_eq!(city_code("Zanzibar"), "ZAN");
    }

    #[test]
    fn test_generates_exactly_ten_flights() {
        assert_eq!(mock_flights("Mombasa", "Nairobi", "2099-01-01", 1).len(), 10);
    }

    #[test]
    fn test_field_invariants_hold_for_every_record() {
        let adults = 2u32;
        let flights = mock_flights("Mombasa", "Nairobi", "2099-01-01", adults);

        for flight in &flights {
            assert_eq!(flight.origin, "MBA");
            assert_eq!(flight.destination, "NBO");
            assert_eq!(flight.currency, "USD");
            assert_eq!(flight.class, "Economy");
            assert_eq!(flight.date, "2099-01-01");

            // price = base * adults with base in [150, 650)
            let base = flight.price / f64::from(adults);
            assert!(base >= 150.0 && base < 650.0, "base price {base} out of range");
            assert_eq!(flight.price % f64::from(adults), 0.0);

            assert!((1..=50).contains(&flight.seats_available));
            assert!(flight.stops <= 2);
            let expected_checked = if flight.stops == 0 { "2 bags" } else { "1 bag" };
            assert_eq!(flight.baggage.checked, expected_checked);
            assert_eq!(flight.baggage.cabin, "1 personal item");

            // HH:MM with minutes pinned to 00 or 30.
            assert_eq!(flight.departure_time.len(), 5);
            assert!(flight.departure_time.ends_with(":00") || flight.departure_time.ends_with(":30"));
            let hour: u32 = flight.departure_time[..2].parse().unwrap();
            assert!((4..24).contains(&hour));
        }
    }

    #[test]
    fn test_sorted_ascending_by_price() {
        let flights = mock_flights("London", "Paris", "2099-06-15", 3);
        assert!(flights.windows(2).all(|pair| pair[0].price <= pair[1].price));
    }

    #[test]
    fn test_flight_numbers_use_airline_prefix() {
        for flight in mock_flights("Boston", "Denver", "2099-03-03", 1) {
            let prefix = flight.airline[..2].to_uppercase();
            assert!(flight.flight_number.starts_with(&prefix));
            let number: u32 = flight.flight_number[2..].parse().unwrap();
            assert!((1000..10000).contains(&number));
        }
    }
}
