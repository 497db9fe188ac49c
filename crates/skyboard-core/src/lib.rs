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

//! Core state for the skyboard flight board.
//!
//! The crate has no UI dependency. It provides:
//!
//! - **Panel**: the draggable bottom panel's offset, three snap positions and
//!   spring animation ([`panel::PanelController`])
//! - **Simulation**: timed random status changes, per-tick notification
//!   selection, and a rate-limited delivery queue ([`simulation::SimulationController`])
//! - **Flight data**: the flight model, seed data, search, route focus, sharing,
//!   theme state and the optional AviationStack client
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use skyboard_core::flight::{seed_flights, shared_board, FlightBoard};
//! use skyboard_core::simulation::{
//!     DispatchError, Notifier, SimulationConfig, SimulationController,
//! };
//!
//! struct Console;
//!
//! impl Notifier for Console {
//!     fn request_permission(&self) -> bool {
//!         true
//!     }
//!
//!     fn deliver(&self, title: &str, body: &str) -> Result<(), DispatchError> {
//!         println!("{title}: {body}");
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let board = shared_board(FlightBoard::new(seed_flights()));
//!     let mut sim = SimulationController::new(
//!         tokio::runtime::Handle::current(),
//!         board,
//!         Arc::new(Console),
//!         SimulationConfig::default(),
//!     );
//!     sim.start();
//!     tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//!     sim.dispose();
//! }
//! ```

pub mod flight;
pub mod panel;
pub mod permission;
pub mod route;
pub mod search;
pub mod service;
pub mod share;
pub mod simulation;
pub mod theme;

pub use flight::{Flight, FlightBoard, FlightStatus, SharedBoard};
pub use panel::{PanelController, PanelLayout, SnapState};
pub use simulation::{NotificationItem, Notifier, SimulationConfig, SimulationController};
pub use theme::Theme;
