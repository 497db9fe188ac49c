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

//! Flight records and the shared flight board.
//!
//! A [`Flight`] is mutated only by the simulation step; everything else
//! (list rendering, search, sharing, map focus) reads it.

mod board;
mod seed;

pub use board::{shared_board, FlightBoard, SharedBoard};
pub use seed::seed_flights;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flight status as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightStatus {
    #[serde(rename = "On Time")]
    OnTime,
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "Departed")]
    Departed,
    #[serde(rename = "Landed")]
    Landed,
    #[serde(rename = "Canceled")]
    Canceled,
    #[serde(rename = "Gate Changed")]
    GateChanged,
    #[serde(rename = "Departs On Time")]
    DepartsOnTime,
}

impl FlightStatus {
    /// Display string, identical to the wording used in notifications.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::OnTime => "On Time",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Departed => "Departed",
            FlightStatus::Landed => "Landed",
            FlightStatus::Canceled => "Canceled",
            FlightStatus::GateChanged => "Gate Changed",
            FlightStatus::DepartsOnTime => "Departs On Time",
        }
    }

    /// Notification priority, lower wins.
    ///
    /// Order: Canceled, Gate Changed, Delayed, Departed, On Time.
    /// Statuses outside that list rank after all of them.
    #[must_use]
    pub fn notification_priority(&self) -> usize {
        match self {
            FlightStatus::Canceled => 0,
            FlightStatus::GateChanged => 1,
            FlightStatus::Delayed => 2,
            FlightStatus::Departed => 3,
            FlightStatus::OnTime => 4,
            FlightStatus::Landed | FlightStatus::DepartsOnTime => usize::MAX,
        }
    }

    /// Whether the status should be rendered as a warning.
    #[must_use]
    pub fn is_disruption(&self) -> bool {
        matches!(
            self,
            FlightStatus::Delayed | FlightStatus::Canceled | FlightStatus::GateChanged
        )
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One end of a flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    /// IATA airport code (e.g., "KUL").
    pub code: String,
    pub city: String,
    pub gate: String,
    pub terminal: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Airport {
    /// Coordinates as `(lat, lon)` when both are known.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }
}

/// A tracked flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    /// Unique key within the board.
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub origin: Airport,
    pub destination: Airport,
    /// Scheduled departure (absent when the source did not provide one).
    pub departure_time: Option<DateTime<Utc>>,
    /// Scheduled arrival.
    pub arrival_time: Option<DateTime<Utc>>,
    pub status: FlightStatus,
    #[serde(default)]
    pub aircraft_type: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    /// Large "time to event" text, e.g. "1h" or "15".
    pub time_to_event_major: String,
    /// Small "time to event" text, e.g. "7 MINUTES".
    pub time_to_event_minor: String,
    /// Placeholder glyph standing in for the airline logo.
    pub airline_logo: String,
}

impl Flight {
    /// "Airline FlightNumber", used as a title in banners and share sheets.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.airline, self.flight_number)
    }

    /// "City (CODE) → City (CODE)".
    #[must_use]
    pub fn route_label(&self) -> String {
        format!(
            "{} ({}) → {} ({})",
            self.origin.city, self.origin.code, self.destination.city, self.destination.code
        )
    }
}

/// Format an optional timestamp, falling back to "N/A".
#[must_use]
pub fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "N/A".to_string(), |t| t.format("%Y-%m-%d %H:%M UTC").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_match_display_wording() {
        assert_eq!(FlightStatus::GateChanged.to_string(), "Gate Changed");
        assert_eq!(FlightStatus::DepartsOnTime.as_str(), "Departs On Time");
        let json = serde_json::to_string(&FlightStatus::OnTime).unwrap();
        assert_eq!(json, "\"On Time\"");
    }

    #[test]
    fn priority_ranks_cancellation_first_and_unranked_last() {
        let mut statuses = vec![
            FlightStatus::OnTime,
            FlightStatus::Landed,
            FlightStatus::Departed,
            FlightStatus::Canceled,
            FlightStatus::Delayed,
            FlightStatus::GateChanged,
        ];
        statuses.sort_by_key(FlightStatus::notification_priority);
        assert_eq!(
            statuses,
            vec![
                FlightStatus::Canceled,
                FlightStatus::GateChanged,
                FlightStatus::Delayed,
                FlightStatus::Departed,
                FlightStatus::OnTime,
                FlightStatus::Landed,
            ]
        );
    }

    #[test]
    fn coordinates_require_both_components() {
        let mut airport = Airport {
            code: "KUL".to_string(),
            city: "Kuala Lumpur".to_string(),
            gate: "C12".to_string(),
            terminal: "1".to_string(),
            latitude: Some(2.7456),
            longitude: None,
        };
        assert!(airport.coordinates().is_none());

        airport.longitude = Some(101.7072);
        assert_eq!(airport.coordinates(), Some((2.7456, 101.7072)));

        airport.latitude = Some(f64::NAN);
        assert!(airport.coordinates().is_none());
    }

    #[test]
    fn format_time_falls_back_to_na() {
        assert_eq!(format_time(None), "N/A");
    }
}
