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

//! Application configuration management.
//!
//! Persistent settings are stored in TOML via `confy`. Command-line flags
//! override a few of them for the current run only.

use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};
use skyboard_core::route::INITIAL_CENTER;
use skyboard_core::service::{resolve_api_key, ServiceConfig, DEFAULT_BASE_URL};
use skyboard_core::simulation::{default_rules, SimulationConfig};
use skyboard_core::Theme;

const APP_NAME: &str = "skyboard-desktop";
const CONFIG_NAME: &str = "config";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Theme used until the system appearance reports a change
    #[serde(default)]
    pub theme: Theme,

    /// Initial window size in logical pixels
    #[serde(default = "default_window_width")]
    pub window_width: f32,

    #[serde(default = "default_window_height")]
    pub window_height: f32,

    /// Run the simulated status updates
    #[serde(default = "default_true")]
    pub simulate_updates: bool,

    /// Period between simulated update batches, in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Minimum delay between two notifications, in milliseconds
    #[serde(default = "default_notification_gap_ms")]
    pub notification_gap_ms: u64,

    /// Minimum delay between two share attempts, in milliseconds
    #[serde(default = "default_share_cooldown_ms")]
    pub share_cooldown_ms: u64,

    /// Answer given when notification permission is requested
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,

    /// Load flights from AviationStack instead of the built-in set
    #[serde(default)]
    pub use_remote_data: bool,

    /// AviationStack base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// AviationStack API key (optional, env var takes precedence)
    #[serde(default)]
    pub aviationstack_api_key: Option<String>,

    /// Initial map center
    #[serde(default = "default_map_latitude")]
    pub map_latitude: f64,

    #[serde(default = "default_map_longitude")]
    pub map_longitude: f64,
}

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_window_width() -> f32 {
    430.0
}

fn default_window_height() -> f32 {
    900.0
}

fn default_tick_interval_ms() -> u64 {
    7000
}

fn default_notification_gap_ms() -> u64 {
    5000
}

fn default_share_cooldown_ms() -> u64 {
    1000
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_map_latitude() -> f64 {
    INITIAL_CENTER.0
}

fn default_map_longitude() -> f64 {
    INITIAL_CENTER.1
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            simulate_updates: true,
            tick_interval_ms: default_tick_interval_ms(),
            notification_gap_ms: default_notification_gap_ms(),
            share_cooldown_ms: default_share_cooldown_ms(),
            notifications_enabled: true,
            use_remote_data: false,
            api_base_url: default_api_base_url(),
            aviationstack_api_key: None,
            map_latitude: default_map_latitude(),
            map_longitude: default_map_longitude(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, creating it with defaults on first run
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    pub fn simulation(&self) -> SimulationConfig {
        let tick_interval_ms = if self.tick_interval_ms == 0 {
            warn!(
                "tick_interval_ms must be non-zero, using {} ms",
                default_tick_interval_ms()
            );
            default_tick_interval_ms()
        } else {
            self.tick_interval_ms
        };
        SimulationConfig {
            tick_interval: Duration::from_millis(tick_interval_ms),
            notification_gap: Duration::from_millis(self.notification_gap_ms),
            rules: default_rules(),
        }
    }

    pub fn share_cooldown(&self) -> Duration {
        Duration::from_millis(self.share_cooldown_ms)
    }

    pub fn service(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.api_base_url.clone(),
            api_key: resolve_api_key(self.aviationstack_api_key.as_deref()),
            ..ServiceConfig::default()
        }
    }
}
