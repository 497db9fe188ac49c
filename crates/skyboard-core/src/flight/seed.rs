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

use chrono::{DateTime, TimeZone, Utc};

use super::{Airport, Flight, FlightStatus};

fn airport(code: &str, city: &str, gate: &str, terminal: &str, lat: f64, lon: f64) -> Airport {
    Airport {
        code: code.to_string(),
        city: city.to_string(),
        gate: gate.to_string(),
        terminal: terminal.to_string(),
        latitude: Some(lat),
        longitude: Some(lon),
    }
}

fn at(day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 8, day, hour, minute, 0).single()
}

/// The fixed collection loaded at startup.
///
/// Ids "1" through "5" are the keys the simulation rule table refers to.
#[must_use]
pub fn seed_flights() -> Vec<Flight> {
    vec![
        Flight {
            id: "1".to_string(),
            airline: "Malaysia Airlines".to_string(),
            flight_number: "MH 2614".to_string(),
            origin: airport("KUL", "Kuala Lumpur", "C12", "1", 2.7456, 101.7072),
            destination: airport("PEN", "Penang", "4", "Main", 5.2971, 100.2770),
            departure_time: at(15, 10, 45),
            arrival_time: at(15, 11, 50),
            status: FlightStatus::DepartsOnTime,
            aircraft_type: Some("Boeing 737-800".to_string()),
            duration: Some("1h 5m".to_string()),
            notes: Vec::new(),
            time_to_event_major: "1h".to_string(),
            time_to_event_minor: "7 MINUTES".to_string(),
            airline_logo: "✈".to_string(),
        },
        Flight {
            id: "2".to_string(),
            airline: "AirAsia".to_string(),
            flight_number: "AK 6102".to_string(),
            origin: airport("KUL", "Kuala Lumpur", "Q7", "2", 2.7456, 101.7072),
            destination: airport("BKI", "Kota Kinabalu", "8", "1", 5.9372, 116.0515),
            departure_time: at(15, 19, 30),
            arrival_time: at(15, 22, 5),
            status: FlightStatus::Delayed,
            aircraft_type: Some("Airbus A320neo".to_string()),
            duration: Some("2h 35m".to_string()),
            notes: vec!["Previously on time".to_string()],
            time_to_event_major: "1h".to_string(),
            time_to_event_minor: "50 MINUTES".to_string(),
            airline_logo: "✈".to_string(),
        },
        Flight {
            id: "3".to_string(),
            airline: "Singapore Airlines".to_string(),
            flight_number: "SQ 105".to_string(),
            origin: airport("SIN", "Singapore", "B5", "2", 1.3644, 103.9915),
            destination: airport("KUL", "Kuala Lumpur", "C24", "1", 2.7456, 101.7072),
            departure_time: at(16, 0, 45),
            arrival_time: at(16, 1, 50),
            status: FlightStatus::OnTime,
            aircraft_type: Some("Airbus A350-900".to_string()),
            duration: Some("1h 5m".to_string()),
            notes: Vec::new(),
            time_to_event_major: "15".to_string(),
            time_to_event_minor: "HOURS".to_string(),
            airline_logo: "✈".to_string(),
        },
        Flight {
            id: "4".to_string(),
            airline: "Emirates".to_string(),
            flight_number: "EK 202".to_string(),
            origin: airport("KUL", "Kuala Lumpur", "C31", "1", 2.7456, 101.7072),
            destination: airport("DXB", "Dubai", "B14", "3", 25.2532, 55.3657),
            departure_time: at(15, 2, 50),
            arrival_time: at(15, 6, 5),
            status: FlightStatus::Landed,
            aircraft_type: Some("Boeing 777-300ER".to_string()),
            duration: Some("7h 15m".to_string()),
            notes: Vec::new(),
            time_to_event_major: "Landed".to_string(),
            time_to_event_minor: "6:05 AM".to_string(),
            airline_logo: "✈".to_string(),
        },
        Flight {
            id: "5".to_string(),
            airline: "Batik Air".to_string(),
            flight_number: "OD 1303".to_string(),
            origin: airport("KUL", "Kuala Lumpur", "H2", "1", 2.7456, 101.7072),
            destination: airport("CGK", "Jakarta", "3", "2", -6.1256, 106.6559),
            departure_time: at(15, 14, 15),
            arrival_time: at(15, 15, 20),
            status: FlightStatus::OnTime,
            aircraft_type: Some("Boeing 737 MAX 8".to_string()),
            duration: Some("2h 5m".to_string()),
            notes: Vec::new(),
            time_to_event_major: "4h".to_string(),
            time_to_event_minor: "22 MINUTES".to_string(),
            airline_logo: "✈".to_string(),
        },
    ]
}
