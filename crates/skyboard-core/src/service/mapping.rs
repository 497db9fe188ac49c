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

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::FLIGHT_LIMIT;
use crate::flight::{Airport, Flight, FlightStatus};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiFlightNumber {
    pub number: Option<String>,
    pub iata: Option<String>,
    pub icao: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEndpoint {
    pub airport: Option<String>,
    pub iata: Option<String>,
    pub scheduled: Option<String>,
    pub terminal: Option<String>,
    pub gate: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiAirline {
    pub name: Option<String>,
    pub iata: Option<String>,
}

/// One element of the API's `data` array. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiFlight {
    pub flight: Option<ApiFlightNumber>,
    pub departure: Option<ApiEndpoint>,
    pub arrival: Option<ApiEndpoint>,
    pub airline: Option<ApiAirline>,
    #[serde(alias = "flight_status")]
    pub status: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

fn or_empty(value: Option<&String>) -> String {
    non_empty(value).unwrap_or_default().to_string()
}

fn or_na(value: Option<&String>) -> String {
    non_empty(value).unwrap_or(NOT_AVAILABLE).to_string()
}

fn parse_time(value: Option<&String>) -> Option<DateTime<Utc>> {
    let raw = non_empty(value)?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn map_status(raw: Option<&String>) -> FlightStatus {
    let raw = raw.map(|s| s.to_lowercase()).unwrap_or_default();
    if raw.contains("delayed") {
        FlightStatus::Delayed
    } else if raw.contains("landed") {
        FlightStatus::Landed
    } else if raw.contains("cancelled") {
        FlightStatus::Canceled
    } else {
        FlightStatus::OnTime
    }
}

fn map_airport(endpoint: Option<&ApiEndpoint>) -> Airport {
    let endpoint = endpoint.cloned().unwrap_or_default();
    Airport {
        code: or_empty(endpoint.iata.as_ref()),
        city: or_empty(endpoint.airport.as_ref()),
        gate: or_na(endpoint.gate.as_ref()),
        terminal: or_na(endpoint.terminal.as_ref()),
        latitude: None,
        longitude: None,
    }
}

/// "Time to event" text for a departure, as `(major, minor)`.
///
/// More than an hour out reads `("2h", "15 MINUTES")`; otherwise `("15", "MINUTES")`.
#[must_use]
pub fn time_to_event(departure: Option<DateTime<Utc>>, now: DateTime<Utc>) -> (String, String) {
    let Some(departure) = departure else {
        return (NOT_AVAILABLE.to_string(), String::new());
    };

    let diff = departure - now;
    let hours = diff.num_hours();
    let minutes = (diff - chrono::Duration::hours(hours)).num_minutes();

    if hours > 0 {
        (format!("{hours}h"), format!("{minutes} MINUTES"))
    } else {
        (minutes.to_string(), "MINUTES".to_string())
    }
}

/// Map one API record to a [`Flight`].
#[must_use]
pub fn map_flight(api: &ApiFlight, now: DateTime<Utc>) -> Flight {
    let number = api.flight.clone().unwrap_or_default();
    let airline = api.airline.clone().unwrap_or_default();
    let departure_time = parse_time(api.departure.as_ref().and_then(|d| d.scheduled.as_ref()));
    let arrival_time = parse_time(api.arrival.as_ref().and_then(|a| a.scheduled.as_ref()));
    let (major, minor) = time_to_event(departure_time, now);

    let flight_number = non_empty(number.iata.as_ref())
        .or_else(|| non_empty(number.number.as_ref()))
        .unwrap_or_default()
        .to_string();
    let id = if flight_number.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        flight_number.clone()
    };

    Flight {
        id,
        airline: or_empty(airline.name.as_ref()),
        flight_number,
        origin: map_airport(api.departure.as_ref()),
        destination: map_airport(api.arrival.as_ref()),
        departure_time,
        arrival_time,
        status: map_status(api.status.as_ref()),
        aircraft_type: None,
        duration: None,
        notes: Vec::new(),
        time_to_event_major: major,
        time_to_event_minor: minor,
        airline_logo: "✈".to_string(),
    }
}

/// Whether a mapped flight has enough data to show.
#[must_use]
pub fn complete(flight: &Flight) -> bool {
    !flight.airline.is_empty()
        && !flight.flight_number.is_empty()
        && !flight.origin.city.is_empty()
        && !flight.destination.city.is_empty()
}

/// Put `preferred` first unless a flight with the same id is already present,
/// then cap the list at [`FLIGHT_LIMIT`].
#[must_use]
pub fn merge_preferred(mut flights: Vec<Flight>, preferred: Option<Flight>) -> Vec<Flight> {
    if let Some(preferred) = preferred {
        if !flights.iter().any(|f| f.id == preferred.id) {
            flights.insert(0, preferred);
        }
    }
    flights.truncate(FLIGHT_LIMIT);
    flights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::parse_response;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 15, 8, 0, 0).unwrap()
    }

    #[test]
    fn maps_full_record() {
        let body = r#"{"data": [{
            "flight": {"number": "6102", "iata": "AK6102", "icao": "AXM6102"},
            "departure": {"airport": "Kuala Lumpur International", "iata": "KUL",
                          "scheduled": "2024-08-15T10:15:00+00:00", "terminal": "2", "gate": "Q7"},
            "arrival": {"airport": "Kota Kinabalu International", "iata": "BKI",
                        "scheduled": "2024-08-15T12:50:00+00:00", "terminal": null, "gate": null},
            "airline": {"name": "AirAsia", "iata": "AK"},
            "flight_status": "delayed"
        }]}"#;
        let records = parse_response(body).unwrap();
        let flight = map_flight(&records[0], now());

        assert_eq!(flight.id, "AK6102");
        assert_eq!(flight.flight_number, "AK6102");
        assert_eq!(flight.airline, "AirAsia");
        assert_eq!(flight.origin.code, "KUL");
        assert_eq!(flight.origin.gate, "Q7");
        assert_eq!(flight.destination.gate, "N/A");
        assert_eq!(flight.destination.terminal, "N/A");
        assert_eq!(flight.status, FlightStatus::Delayed);
        assert_eq!(flight.time_to_event_major, "2h");
        assert_eq!(flight.time_to_event_minor, "15 MINUTES");
        assert!(complete(&flight));
    }

    #[test]
    fn sparse_record_gets_placeholders_and_is_incomplete() {
        let flight = map_flight(&ApiFlight::default(), now());
        assert!(!flight.id.is_empty());
        assert_eq!(flight.airline, "");
        assert_eq!(flight.origin.gate, "N/A");
        assert_eq!(flight.status, FlightStatus::OnTime);
        assert_eq!(flight.time_to_event_major, "N/A");
        assert!(!complete(&flight));
    }

    #[test]
    fn status_text_mapping() {
        let status = |s: &str| map_status(Some(&s.to_string()));
        assert_eq!(status("Landed"), FlightStatus::Landed);
        assert_eq!(status("cancelled"), FlightStatus::Canceled);
        assert_eq!(status("scheduled"), FlightStatus::OnTime);
        assert_eq!(map_status(None), FlightStatus::OnTime);
    }

    #[test]
    fn time_to_event_under_an_hour() {
        let dep = Some(now() + chrono::Duration::minutes(42));
        assert_eq!(time_to_event(dep, now()), ("42".to_string(), "MINUTES".to_string()));
    }

    #[test]
    fn preferred_airline_is_prepended_and_list_capped() {
        let base = map_flight(&ApiFlight::default(), now());
        let flights: Vec<Flight> = (0..5)
            .map(|i| Flight {
                id: format!("F{i}"),
                ..base.clone()
            })
            .collect();
        let preferred = Flight {
            id: "MH2614".to_string(),
            ..base.clone()
        };

        let merged = merge_preferred(flights.clone(), Some(preferred));
        assert_eq!(merged.len(), FLIGHT_LIMIT);
        assert_eq!(merged[0].id, "MH2614");
        assert_eq!(merged[4].id, "F3");

        let duplicate = Flight {
            id: "F2".to_string(),
            ..base
        };
        let merged = merge_preferred(flights, Some(duplicate));
        assert_eq!(merged[0].id, "F0");
    }
}
