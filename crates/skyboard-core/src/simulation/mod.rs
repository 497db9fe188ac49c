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

//! Simulated status updates and the notification pipeline they feed.
//!
//! Each tick runs one batch: every flight with a rule gets one draw, all
//! resulting transitions are collected, and at most one notification (the
//! highest priority one) is queued. A separate drain loop delivers queued
//! notifications one at a time with a fixed gap.

mod controller;
mod notification;
mod queue;
mod rules;

pub use controller::{SimulationConfig, SimulationController};
pub use notification::{select_highest_priority, NotificationItem, StatusTransition};
pub use queue::{DispatchError, NotificationQueue, Notifier};
pub use rules::{
    default_rules, next_status, DrawSource, GateChange, RandomDraws, ScriptedDraws, StatusDraw,
    StatusRule,
};

use log::{debug, info};

use crate::flight::FlightBoard;

/// Applies the rule table to a board, one batch per call.
pub struct TickEngine {
    rules: Vec<StatusRule>,
    draws: Box<dyn DrawSource>,
}

impl std::fmt::Debug for TickEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickEngine")
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

impl TickEngine {
    #[must_use]
    pub fn new(rules: Vec<StatusRule>, draws: Box<dyn DrawSource>) -> Self {
        Self { rules, draws }
    }

    /// Mutate every flight that has a rule and return the transitions, in board order.
    pub fn apply(&mut self, board: &mut FlightBoard) -> Vec<StatusTransition> {
        let mut transitions = Vec::new();

        for flight in board.flights_mut() {
            let Some(rule) = self.rules.iter().find(|r| r.flight_id == flight.id) else {
                continue;
            };

            let draw = self.draws.draw(&flight.id, rule.choices.len());
            let Some(next) = next_status(flight.status, rule, draw) else {
                continue;
            };

            let gate = rule.gate_for(next).map(str::to_string);
            info!(
                "Simulating status change for {}: {} -> {}",
                flight.flight_number, flight.status, next
            );
            transitions.push(StatusTransition::new(flight, next, gate.clone()));

            flight.status = next;
            if let Some(gate) = gate {
                flight.destination.gate = gate;
            }
        }

        board.record_batch();
        debug!(
            "Batch {} produced {} transition(s)",
            board.batches(),
            transitions.len()
        );
        transitions
    }

    /// Run one batch and queue the winning notification, if any.
    pub fn tick(
        &mut self,
        board: &mut FlightBoard,
        queue: &NotificationQueue,
    ) -> Option<NotificationItem> {
        let transitions = self.apply(board);
        let chosen = select_highest_priority(&transitions)?;
        if transitions.len() > 1 {
            debug!(
                "Dropping {} lower priority notification(s) this tick",
                transitions.len() - 1
            );
        }
        queue.push(chosen.clone());
        Some(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::{seed_flights, FlightStatus};

    fn engine(draws: ScriptedDraws) -> TickEngine {
        TickEngine::new(default_rules(), Box::new(draws))
    }

    #[test]
    fn batch_without_draws_changes_nothing() {
        let mut board = FlightBoard::new(seed_flights());
        let queue = NotificationQueue::new();
        let before = board.flights().to_vec();

        assert!(engine(ScriptedDraws::new()).tick(&mut board, &queue).is_none());
        assert_eq!(board.flights(), before.as_slice());
        assert_eq!(board.batches(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn drawing_same_status_queues_nothing() {
        let mut board = FlightBoard::new(seed_flights());
        let queue = NotificationQueue::new();
        // Flight 4 starts Landed; choice 0 is Landed.
        let mut engine = engine(ScriptedDraws::new().with("4", StatusDraw::fire(0)));

        assert!(engine.apply(&mut board).is_empty());
        assert!(engine.tick(&mut board, &queue).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn simultaneous_changes_queue_only_the_cancellation() {
        let mut board = FlightBoard::new(seed_flights());
        let queue = NotificationQueue::new();
        let mut engine = engine(
            ScriptedDraws::new()
                .with("2", StatusDraw::fire(1))
                .with("4", StatusDraw::fire(1)),
        );

        let chosen = engine.tick(&mut board, &queue).unwrap();

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.front(), Some(chosen.clone()));
        assert_eq!(chosen.title, "Flight AirAsia AK 6102 Status Change");
        assert_eq!(chosen.body, "Status changed from Delayed to Canceled.");
        // Both flights were still mutated.
        assert_eq!(board.get("2").unwrap().status, FlightStatus::Canceled);
        assert_eq!(board.get("4").unwrap().status, FlightStatus::GateChanged);
    }

    #[test]
    fn gate_change_updates_destination_gate() {
        let mut board = FlightBoard::new(seed_flights());
        let queue = NotificationQueue::new();
        let mut engine = engine(ScriptedDraws::new().with("4", StatusDraw::fire(1)));

        engine.tick(&mut board, &queue);

        let flight = board.get("4").unwrap();
        assert_eq!(flight.status, FlightStatus::GateChanged);
        assert_eq!(flight.destination.gate, "A2");
        assert_eq!(
            queue.front(),
            Some(NotificationItem::new(
                "Flight Emirates EK 202 Status Change",
                "Status changed from Landed to Gate Changed. Gate: A2"
            ))
        );
    }

    #[test]
    fn flights_without_rules_are_untouched() {
        let mut flights = seed_flights();
        flights[0].id = "99".to_string();
        let mut board = FlightBoard::new(flights);
        let mut engine = engine(ScriptedDraws::new().with("99", StatusDraw::fire(1)));

        assert!(engine.apply(&mut board).is_empty());
    }
}
