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

//! One-time notification permission request.

use log::{info, warn};

use crate::simulation::Notifier;

pub const PERMISSION_ALERT_TITLE: &str = "Permission required";
pub const PERMISSION_ALERT_MESSAGE: &str =
    "Please grant push notification permissions to receive flight updates!";

/// Result of the startup permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Asks the notifier once and raises at most one alert on denial.
///
/// A denial does not stop the simulation; deliveries simply fail and are logged.
#[derive(Debug, Default)]
pub struct PermissionGate {
    answer: Option<Permission>,
    alerted: bool,
}

impl PermissionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request permission. Only the first call reaches the notifier.
    pub fn request(&mut self, notifier: &dyn Notifier) -> Permission {
        if let Some(answer) = self.answer {
            return answer;
        }

        let answer = if notifier.request_permission() {
            info!("Notification permission granted");
            Permission::Granted
        } else {
            warn!("Notification permission denied");
            Permission::Denied
        };
        self.answer = Some(answer);
        answer
    }

    #[must_use]
    pub fn answer(&self) -> Option<Permission> {
        self.answer
    }

    /// The denial alert `(title, message)`, returned once.
    pub fn take_alert(&mut self) -> Option<(&'static str, &'static str)> {
        if self.answer == Some(Permission::Denied) && !self.alerted {
            self.alerted = true;
            Some((PERMISSION_ALERT_TITLE, PERMISSION_ALERT_MESSAGE))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::DispatchError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingNotifier {
        granted: bool,
        asked: AtomicUsize,
    }

    impl Notifier for CountingNotifier {
        fn request_permission(&self) -> bool {
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.granted
        }

        fn deliver(&self, _title: &str, _body: &str) -> Result<(), DispatchError> {
            Ok(())
        }
    }

    fn notifier(granted: bool) -> CountingNotifier {
        CountingNotifier {
            granted,
            asked: AtomicUsize::new(0),
        }
    }

    #[test]
    fn denial_alerts_exactly_once() {
        let notifier = notifier(false);
        let mut gate = PermissionGate::new();

        assert_eq!(gate.request(&notifier), Permission::Denied);
        assert_eq!(gate.request(&notifier), Permission::Denied);
        assert_eq!(notifier.asked.load(Ordering::SeqCst), 1);

        assert_eq!(
            gate.take_alert(),
            Some((PERMISSION_ALERT_TITLE, PERMISSION_ALERT_MESSAGE))
        );
        assert_eq!(gate.take_alert(), None);
    }

    #[test]
    fn grant_raises_no_alert() {
        let notifier = notifier(true);
        let mut gate = PermissionGate::new();

        assert_eq!(gate.take_alert(), None);
        assert_eq!(gate.request(&notifier), Permission::Granted);
        assert_eq!(gate.answer(), Some(Permission::Granted));
        assert_eq!(gate.take_alert(), None);
    }
}
