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

mod app;
mod carto_tiles;
mod clipboard;
mod config;
mod notifier;
mod runtime;
mod ui;

use std::error::Error;

use clap::Parser;
use eframe::egui;
use log::{info, warn};
use mimalloc::MiMalloc;

use app::{FlightScreen, LaunchOptions};
use config::AppConfig;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Desktop flight board with simulated status notifications.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Seed the simulated updates for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Enable or disable simulated status updates (overrides config)
    #[arg(long)]
    simulate: Option<bool>,

    /// Load flights from AviationStack (needs AVIATIONSTACK_API_KEY)
    #[arg(long)]
    live: bool,

    /// Initial window height in logical pixels
    #[arg(long)]
    height: Option<f32>,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(simulate) = self.simulate {
            config.simulate_updates = simulate;
        }
        if self.live {
            config.use_remote_data = true;
        }
        if let Some(height) = self.height {
            config.window_height = height;
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });
    if let Ok(path) = AppConfig::get_config_path() {
        info!("Config file: {}", path.display());
    }
    args.apply(&mut config);

    info!("Starting Skyboard Desktop...");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Skyboard"),
        ..Default::default()
    };
    let launch = LaunchOptions { seed: args.seed };

    eframe::run_native(
        "Skyboard",
        options,
        Box::new(move |cc| Ok(Box::new(FlightScreen::new(cc, config, launch)?))),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "skyboard-desktop",
            "--seed",
            "7",
            "--simulate",
            "false",
            "--live",
            "--height",
            "700",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(args.seed, Some(7));
        assert!(!config.simulate_updates);
        assert!(config.use_remote_data);
        assert!((config.window_height - 700.0).abs() < f32::EPSILON);
    }

    #[test]
    fn no_flags_keep_config() {
        let args = Args::parse_from(["skyboard-desktop"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config, AppConfig::default());
    }
}
