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

use serde::{Deserialize, Serialize};

use crate::flight::{Flight, FlightStatus};

/// A user-facing notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub title: String,
    pub body: String,
}

impl NotificationItem {
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A status change detected on one flight during a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTransition {
    pub flight_id: String,
    pub airline: String,
    pub flight_number: String,
    pub from: FlightStatus,
    pub to: FlightStatus,
    /// New destination gate, when the transition assigned one.
    pub gate: Option<String>,
}

impl StatusTransition {
    /// Build a transition for `flight` (still carrying its old status).
    #[must_use]
    pub fn new(flight: &Flight, to: FlightStatus, gate: Option<String>) -> Self {
        Self {
            flight_id: flight.id.clone(),
            airline: flight.airline.clone(),
            flight_number: flight.flight_number.clone(),
            from: flight.status,
            to,
            gate,
        }
    }

    /// Render the transition as a notification.
    #[must_use]
    pub fn to_notification(&self) -> NotificationItem {
        let mut body = format!("Status changed from {} to {}.", self.from, self.to);
        if let Some(gate) = &self.gate {
            body.push_str(" Gate: ");
            body.push_str(gate);
        }

        NotificationItem {
            title: format!(
                "Flight {} {} Status Change",
                self.airline, self.flight_number
            ),
            body,
        }
    }
}

/// Pick the single notification to enqueue for a batch.
///
/// The transition whose target status ranks highest wins; ties keep the
/// earlier transition. Everything else in the batch is dropped.
#[must_use]
pub fn select_highest_priority(transitions: &[StatusTransition]) -> Option<NotificationItem> {
    transitions
        .iter()
        .min_by_key(|t| t.to.notification_priority())
        .map(StatusTransition::to_notification)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(
        id: &str,
        airline: &str,
        number: &str,
        from: FlightStatus,
        to: FlightStatus,
    ) -> StatusTransition {
        StatusTransition {
            flight_id: id.to_string(),
            airline: airline.to_string(),
            flight_number: number.to_string(),
            from,
            to,
            gate: None,
        }
    }

    #[test]
    fn notification_text() {
        let t = transition(
            "3",
            "Singapore Airlines",
            "SQ 105",
            FlightStatus::OnTime,
            FlightStatus::Departed,
        );
        let item = t.to_notification();
        assert_eq!(item.title, "Flight Singapore Airlines SQ 105 Status Change");
        assert_eq!(item.body, "Status changed from On Time to Departed.");
    }

    #[test]
    fn gate_is_appended_to_body() {
        let mut t = transition(
            "4",
            "Emirates",
            "EK 202",
            FlightStatus::Landed,
            FlightStatus::GateChanged,
        );
        t.gate = Some("A2".to_string());
        assert_eq!(
            t.to_notification().body,
            "Status changed from Landed to Gate Changed. Gate: A2"
        );
    }

    #[test]
    fn cancellation_beats_gate_change() {
        let mut gate = transition(
            "4",
            "Emirates",
            "EK 202",
            FlightStatus::Landed,
            FlightStatus::GateChanged,
        );
        gate.gate = Some("A2".to_string());
        let transitions = vec![
            gate,
            transition(
                "2",
                "AirAsia",
                "AK 6102",
                FlightStatus::Delayed,
                FlightStatus::Canceled,
            ),
        ];

        let item = select_highest_priority(&transitions).unwrap();
        assert_eq!(item.title, "Flight AirAsia AK 6102 Status Change");
        assert_eq!(item.body, "Status changed from Delayed to Canceled.");
    }

    #[test]
    fn unranked_targets_lose_and_ties_keep_first() {
        let transitions = vec![
            transition(
                "4",
                "Emirates",
                "EK 202",
                FlightStatus::GateChanged,
                FlightStatus::Landed,
            ),
            transition(
                "1",
                "Malaysia Airlines",
                "MH 2614",
                FlightStatus::Delayed,
                FlightStatus::OnTime,
            ),
            transition(
                "5",
                "Batik Air",
                "OD 1303",
                FlightStatus::Delayed,
                FlightStatus::OnTime,
            ),
        ];
        let item = select_highest_priority(&transitions).unwrap();
        assert_eq!(item.title, "Flight Malaysia Airlines MH 2614 Status Change");
    }

    #[test]
    fn empty_batch_selects_nothing() {
        assert!(select_highest_priority(&[]).is_none());
    }
}
