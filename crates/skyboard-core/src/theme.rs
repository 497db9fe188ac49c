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

//! Light/dark theme state.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

/// Current theme, toggled by the user and re-synced when the system appearance changes.
#[derive(Debug, Clone, Default)]
pub struct ThemeState {
    current: Theme,
    /// Last system appearance seen; `Some(None)` means the system reported "unknown".
    last_system: Option<Option<Theme>>,
}

impl ThemeState {
    #[must_use]
    pub fn new(initial: Theme) -> Self {
        Self {
            current: initial,
            last_system: None,
        }
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flip between light and dark; returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        info!("Theme switched to {}", self.current);
        self.current
    }

    /// Follow the system appearance.
    ///
    /// The first report only records the appearance, so the configured theme
    /// wins at startup. Later changes override the current theme; an unknown
    /// appearance falls back to light. Returns true when the theme changed.
    pub fn sync_system(&mut self, system: Option<Theme>) -> bool {
        let previous = self.last_system.replace(system);
        if previous.is_none() || previous == Some(system) {
            return false;
        }

        let next = system.unwrap_or(Theme::Light);
        if next == self.current {
            return false;
        }
        info!("System appearance changed, theme now {}", next);
        self.current = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips() {
        let mut state = ThemeState::new(Theme::Light);
        assert_eq!(state.toggle(), Theme::Dark);
        assert_eq!(state.toggle(), Theme::Light);
    }

    #[test]
    fn first_system_report_keeps_configured_theme() {
        let mut state = ThemeState::new(Theme::Dark);
        assert!(!state.sync_system(Some(Theme::Light)));
        assert_eq!(state.current(), Theme::Dark);
    }

    #[test]
    fn system_changes_override_user_choice() {
        let mut state = ThemeState::new(Theme::Light);
        state.sync_system(Some(Theme::Light));
        assert!(state.sync_system(Some(Theme::Dark)));
        assert_eq!(state.current(), Theme::Dark);

        state.toggle();
        // Repeating the same appearance does not undo the toggle.
        assert!(!state.sync_system(Some(Theme::Dark)));
        assert_eq!(state.current(), Theme::Light);

        state.toggle();
        assert!(state.sync_system(None));
        assert_eq!(state.current(), Theme::Light);
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
