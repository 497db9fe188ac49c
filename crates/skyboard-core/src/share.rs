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

//! Sharing flight details, guarded against rapid repeated presses.

use std::time::{Duration, Instant};

use log::{debug, error, info};
use thiserror::Error;

use crate::flight::{format_time, Flight};

/// Default cool-down after a share attempt before another is accepted.
pub const SHARE_COOLDOWN: Duration = Duration::from_millis(1000);

/// What the share target reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Dismissed,
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share target unavailable: {0}")]
    Unavailable(String),
}

/// Text handed to the share target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareMessage {
    pub title: String,
    pub message: String,
}

impl ShareMessage {
    #[must_use]
    pub fn for_flight(flight: &Flight) -> Self {
        let message = format!(
            "✈️ Flight Details\n\n\
             Airline: {}\n\
             Flight: {}\n\
             Route: {}\n\
             Status: {}\n\
             Departure: {}\n\
             Arrival: {}",
            flight.airline,
            flight.flight_number,
            flight.route_label(),
            flight.status,
            format_time(flight.departure_time),
            format_time(flight.arrival_time),
        );
        Self {
            title: flight.display_name(),
            message,
        }
    }
}

/// OS share sheet (or a stand-in such as the clipboard).
pub trait ShareTarget {
    fn share(&self, message: &ShareMessage) -> Result<ShareOutcome, ShareError>;
}

/// Rejects share attempts while a previous one is cooling down.
#[derive(Debug, Clone)]
pub struct ShareGuard {
    cooldown: Duration,
    busy_until: Option<Instant>,
}

impl Default for ShareGuard {
    fn default() -> Self {
        Self::new(SHARE_COOLDOWN)
    }
}

impl ShareGuard {
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            busy_until: None,
        }
    }

    /// Whether a share may start at `now`.
    #[must_use]
    pub fn is_ready(&self, now: Instant) -> bool {
        self.busy_until.map_or(true, |until| now >= until)
    }

    /// Share `flight` through `target`.
    ///
    /// Returns `Ok(None)` when the attempt was skipped because of the cool-down.
    /// The cool-down restarts after every attempt, successful or not.
    pub fn share<T: ShareTarget + ?Sized>(
        &mut self,
        target: &T,
        flight: &Flight,
        now: Instant,
    ) -> Result<Option<ShareOutcome>, ShareError> {
        if !self.is_ready(now) {
            debug!("Already sharing, ignoring press for {}", flight.display_name());
            return Ok(None);
        }

        let message = ShareMessage::for_flight(flight);
        let result = target.share(&message);
        self.busy_until = Some(now + self.cooldown);

        match &result {
            Ok(outcome) => info!("Share of {} finished: {:?}", message.title, outcome),
            Err(e) => error!("Error sharing {}: {}", message.title, e),
        }
        result.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::seed_flights;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeTarget {
        shared: RefCell<Vec<ShareMessage>>,
        fail: bool,
    }

    impl ShareTarget for FakeTarget {
        fn share(&self, message: &ShareMessage) -> Result<ShareOutcome, ShareError> {
            self.shared.borrow_mut().push(message.clone());
            if self.fail {
                Err(ShareError::Unavailable("no clipboard".to_string()))
            } else {
                Ok(ShareOutcome::Shared)
            }
        }
    }

    #[test]
    fn message_lists_flight_details() {
        let flight = &seed_flights()[3];
        let message = ShareMessage::for_flight(flight);
        assert_eq!(message.title, "Emirates EK 202");
        assert!(message.message.contains("Route: Kuala Lumpur (KUL) → Dubai (DXB)"));
        assert!(message.message.contains("Status: Landed"));
        assert!(message.message.contains("Departure: 2024-08-15 02:50 UTC"));
    }

    #[test]
    fn rapid_presses_are_ignored_during_cooldown() {
        let flight = &seed_flights()[0];
        let target = FakeTarget::default();
        let mut guard = ShareGuard::default();
        let t0 = Instant::now();

        assert_eq!(guard.share(&target, flight, t0).unwrap(), Some(ShareOutcome::Shared));
        assert_eq!(guard.share(&target, flight, t0 + Duration::from_millis(500)).unwrap(), None);
        assert_eq!(target.shared.borrow().len(), 1);

        assert!(guard.is_ready(t0 + Duration::from_millis(1000)));
        assert_eq!(
            guard.share(&target, flight, t0 + Duration::from_millis(1000)).unwrap(),
            Some(ShareOutcome::Shared)
        );
        assert_eq!(target.shared.borrow().len(), 2);
    }

    #[test]
    fn failure_also_starts_cooldown() {
        let flight = &seed_flights()[0];
        let target = FakeTarget {
            fail: true,
            ..Default::default()
        };
        let mut guard = ShareGuard::default();
        let t0 = Instant::now();

        assert!(guard.share(&target, flight, t0).is_err());
        assert!(!guard.is_ready(t0 + Duration::from_millis(10)));
    }
}
