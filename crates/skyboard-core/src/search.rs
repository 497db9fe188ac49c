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

//! Search filtering for the flight list.

use crate::flight::Flight;

/// Whether `flight` matches a lowercase query.
fn matches(flight: &Flight, query: &str) -> bool {
    [
        flight.airline.as_str(),
        flight.flight_number.as_str(),
        flight.origin.city.as_str(),
        flight.destination.city.as_str(),
    ]
    .iter()
    .any(|field| !field.is_empty() && field.to_lowercase().contains(query))
}

/// Flights whose airline, flight number, origin city or destination city
/// contains `query`, ignoring case. Surrounding whitespace in the query is ignored.
#[must_use]
pub fn filter_flights<'a>(flights: &'a [Flight], query: &str) -> Vec<&'a Flight> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return flights.iter().collect();
    }
    flights.iter().filter(|f| matches(f, &query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::seed_flights;

    fn ids(flights: &[&Flight]) -> Vec<String> {
        flights.iter().map(|f| f.id.clone()).collect()
    }

    #[test]
    fn empty_query_returns_everything() {
        let flights = seed_flights();
        assert_eq!(filter_flights(&flights, "").len(), flights.len());
        assert_eq!(filter_flights(&flights, "   ").len(), flights.len());
    }

    #[test]
    fn padded_query_is_trimmed() {
        let flights = seed_flights();
        assert_eq!(ids(&filter_flights(&flights, "  emirates  ")), vec!["4"]);
        assert_eq!(ids(&filter_flights(&flights, "\tek 2\n")), vec!["4"]);
    }

    #[test]
    fn matches_each_field_case_insensitively() {
        let flights = seed_flights();
        assert_eq!(ids(&filter_flights(&flights, "emirates")), vec!["4"]);
        assert_eq!(ids(&filter_flights(&flights, "ek 202")), vec!["4"]);
        assert_eq!(ids(&filter_flights(&flights, "DUBAI")), vec!["4"]);
        assert_eq!(ids(&filter_flights(&flights, "singapore")), vec!["3"]);
        assert_eq!(filter_flights(&flights, "kuala").len(), 5);
    }

    #[test]
    fn airport_codes_are_not_searched() {
        let flights = seed_flights();
        assert!(filter_flights(&flights, "dxb").is_empty());
        assert!(filter_flights(&flights, "zzz").is_empty());
    }
}
