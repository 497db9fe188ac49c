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

//! Per-flight status mutation rules and the random draws that drive them.

use std::collections::{HashMap, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::flight::FlightStatus;

/// Gate assigned to the destination when a rule lands on a particular status.
#[derive(Debug, Clone, PartialEq)]
pub struct GateChange {
    pub status: FlightStatus,
    pub gate: String,
}

/// Mutation rule for one flight.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRule {
    /// Id of the flight this rule applies to.
    pub flight_id: String,
    /// Chance (0.0 - 1.0) that the rule fires on a tick.
    pub probability: f64,
    /// Statuses the flight may move to, drawn uniformly.
    pub choices: Vec<FlightStatus>,
    /// Optional destination gate update tied to a status.
    pub gate_change: Option<GateChange>,
}

impl StatusRule {
    fn new(flight_id: &str, probability: f64, choices: &[FlightStatus]) -> Self {
        Self {
            flight_id: flight_id.to_string(),
            probability,
            choices: choices.to_vec(),
            gate_change: None,
        }
    }

    fn with_gate_change(mut self, status: FlightStatus, gate: &str) -> Self {
        self.gate_change = Some(GateChange {
            status,
            gate: gate.to_string(),
        });
        self
    }

    /// Gate to assign when moving to `status`, if any.
    #[must_use]
    pub fn gate_for(&self, status: FlightStatus) -> Option<&str> {
        self.gate_change
            .as_ref()
            .filter(|change| change.status == status)
            .map(|change| change.gate.as_str())
    }
}

/// The rule table applied to the seed flights.
#[must_use]
pub fn default_rules() -> Vec<StatusRule> {
    use FlightStatus::{Canceled, Delayed, Departed, GateChanged, Landed, OnTime};

    vec![
        StatusRule::new("1", 0.3, &[OnTime, Delayed]),
        StatusRule::new("2", 0.5, &[Delayed, Canceled, OnTime]),
        StatusRule::new("3", 0.4, &[OnTime, Delayed, Departed]),
        StatusRule::new("4", 0.4, &[Landed, GateChanged]).with_gate_change(GateChanged, "A2"),
        StatusRule::new("5", 0.2, &[OnTime, Delayed, Departed]),
    ]
}

/// One random draw for one flight on one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusDraw {
    /// Uniform sample in `[0, 1)`; the rule fires when it is below the rule's probability.
    pub trigger: f64,
    /// Index into the rule's choices.
    pub choice: usize,
}

impl StatusDraw {
    /// A draw that always fires and picks `choice`.
    #[must_use]
    pub fn fire(choice: usize) -> Self {
        Self {
            trigger: 0.0,
            choice,
        }
    }

    /// A draw that never fires.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            trigger: 1.0,
            choice: 0,
        }
    }
}

/// Decide the next status for a flight.
///
/// Returns `None` when the rule does not fire, when the choice is out of range,
/// or when the drawn status equals the current one.
#[must_use]
pub fn next_status(
    current: FlightStatus,
    rule: &StatusRule,
    draw: StatusDraw,
) -> Option<FlightStatus> {
    if draw.trigger >= rule.probability {
        return None;
    }
    let drawn = *rule.choices.get(draw.choice)?;
    (drawn != current).then_some(drawn)
}

/// Source of per-flight draws.
pub trait DrawSource: Send {
    /// Produce a draw for `flight_id` whose rule has `choices` options.
    fn draw(&mut self, flight_id: &str, choices: usize) -> StatusDraw;
}

/// Draws from a seedable pseudo-random generator.
#[derive(Debug)]
pub struct RandomDraws {
    rng: StdRng,
}

impl RandomDraws {
    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DrawSource for RandomDraws {
    fn draw(&mut self, _flight_id: &str, choices: usize) -> StatusDraw {
        StatusDraw {
            trigger: self.rng.gen::<f64>(),
            choice: if choices == 0 { 0 } else { self.rng.gen_range(0..choices) },
        }
    }
}

/// Pre-scripted draws keyed by flight id, for replaying exact scenarios.
///
/// Flights without a queued draw get [`StatusDraw::idle`].
#[derive(Debug, Default)]
pub struct ScriptedDraws {
    queued: HashMap<String, VecDeque<StatusDraw>>,
}

impl ScriptedDraws {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a draw for a flight.
    #[must_use]
    pub fn with(mut self, flight_id: &str, draw: StatusDraw) -> Self {
        self.push(flight_id, draw);
        self
    }

    pub fn push(&mut self, flight_id: &str, draw: StatusDraw) {
        self.queued
            .entry(flight_id.to_string())
            .or_default()
            .push_back(draw);
    }
}

impl DrawSource for ScriptedDraws {
    fn draw(&mut self, flight_id: &str, _choices: usize) -> StatusDraw {
        self.queued
            .get_mut(flight_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(StatusDraw::idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str) -> StatusRule {
        default_rules()
            .into_iter()
            .find(|r| r.flight_id == id)
            .unwrap()
    }

    #[test]
    fn rule_table_matches_flights() {
        let rules = default_rules();
        let probabilities: Vec<_> = rules.iter().map(|r| r.probability).collect();
        assert_eq!(probabilities, vec![0.3, 0.5, 0.4, 0.4, 0.2]);
        assert_eq!(rules[3].gate_for(FlightStatus::GateChanged), Some("A2"));
        assert_eq!(rules[3].gate_for(FlightStatus::Landed), None);
        assert_eq!(rules[0].gate_for(FlightStatus::Delayed), None);
    }

    #[test]
    fn draw_above_probability_does_nothing() {
        let r = rule("1");
        let draw = StatusDraw {
            trigger: 0.3,
            choice: 1,
        };
        assert_eq!(next_status(FlightStatus::OnTime, &r, draw), None);

        let draw = StatusDraw {
            trigger: 0.29,
            choice: 1,
        };
        assert_eq!(
            next_status(FlightStatus::OnTime, &r, draw),
            Some(FlightStatus::Delayed)
        );
    }

    #[test]
    fn drawing_current_status_is_not_a_transition() {
        let r = rule("4");
        assert_eq!(
            next_status(FlightStatus::Landed, &r, StatusDraw::fire(0)),
            None
        );
        assert_eq!(
            next_status(FlightStatus::Landed, &r, StatusDraw::fire(1)),
            Some(FlightStatus::GateChanged)
        );
    }

    #[test]
    fn out_of_range_choice_is_ignored() {
        let r = rule("1");
        assert_eq!(next_status(FlightStatus::OnTime, &r, StatusDraw::fire(9)), None);
    }

    #[test]
    fn scripted_draws_replay_in_order_then_idle() {
        let mut draws = ScriptedDraws::new()
            .with("2", StatusDraw::fire(1))
            .with("2", StatusDraw::fire(2));
        assert_eq!(draws.draw("2", 3), StatusDraw::fire(1));
        assert_eq!(draws.draw("2", 3), StatusDraw::fire(2));
        assert_eq!(draws.draw("2", 3), StatusDraw::idle());
        assert_eq!(draws.draw("5", 3), StatusDraw::idle());
    }

    #[test]
    fn seeded_draws_stay_in_range_and_repeat() {
        let mut a = RandomDraws::seeded(7);
        let mut b = RandomDraws::seeded(7);
        for _ in 0..100 {
            let draw = a.draw("3", 3);
            assert!((0.0..1.0).contains(&draw.trigger));
            assert!(draw.choice < 3);
            assert_eq!(draw, b.draw("3", 3));
        }
    }
}
