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

//! UI components for the flight board.

pub mod flight_row;
pub mod list_header;
pub mod map_view;
pub mod route_overlay;

pub use flight_row::{flight_row, RowAction};
pub use list_header::{list_header, HeaderActions, HEADER_HEIGHT};
pub use map_view::MapView;
pub use route_overlay::RouteOverlay;

use egui::Color32;
use skyboard_core::{FlightStatus, Theme};

/// Colors for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub panel_fill: Color32,
    pub row_fill: Color32,
    pub row_selected: Color32,
    pub text: Color32,
    pub muted: Color32,
    pub accent: Color32,
    pub handle: Color32,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                panel_fill: Color32::from_rgba_unmultiplied(248, 249, 251, 245),
                row_fill: Color32::WHITE,
                row_selected: Color32::from_rgb(222, 235, 255),
                text: Color32::from_rgb(20, 24, 30),
                muted: Color32::from_rgb(110, 118, 130),
                accent: Color32::from_rgb(0, 122, 255),
                handle: Color32::from_rgb(190, 195, 205),
            },
            Theme::Dark => Self {
                panel_fill: Color32::from_rgba_unmultiplied(25, 30, 35, 240),
                row_fill: Color32::from_rgb(38, 44, 52),
                row_selected: Color32::from_rgb(45, 70, 105),
                text: Color32::from_rgb(230, 235, 240),
                muted: Color32::from_rgb(150, 160, 170),
                accent: Color32::from_rgb(100, 180, 220),
                handle: Color32::from_rgb(80, 90, 100),
            },
        }
    }
}

pub fn status_color(status: FlightStatus) -> Color32 {
    match status {
        FlightStatus::Canceled => Color32::from_rgb(220, 50, 50),
        FlightStatus::Delayed => Color32::from_rgb(255, 150, 0),
        FlightStatus::GateChanged => Color32::from_rgb(200, 100, 255),
        FlightStatus::Departed | FlightStatus::Landed => Color32::from_rgb(100, 150, 220),
        FlightStatus::OnTime | FlightStatus::DepartsOnTime => Color32::from_rgb(60, 180, 90),
    }
}
