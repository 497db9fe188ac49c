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

//! Origin and destination markers with the route line between them.

use egui::{Color32, Response, Stroke};
use skyboard_core::route::RouteFocus;
use walkers::{lon_lat, MapMemory, Plugin, Projector};

const MARKER_RADIUS: f32 = 6.0;
const ROUTE_WIDTH: f32 = 2.5;

/// Map plugin drawing one selected route.
pub struct RouteOverlay {
    route: RouteFocus,
    color: Color32,
}

impl RouteOverlay {
    pub fn new(route: RouteFocus, color: Color32) -> Self {
        Self { route, color }
    }
}

impl Plugin for RouteOverlay {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &Response,
        projector: &Projector,
        _map_memory: &MapMemory,
    ) {
        let to_screen = |(lat, lon): (f64, f64)| projector.project(lon_lat(lon, lat)).to_pos2();
        let origin = to_screen(self.route.origin);
        let destination = to_screen(self.route.destination);

        let painter = ui.painter();
        painter.line_segment([origin, destination], Stroke::new(ROUTE_WIDTH, self.color));
        painter.circle(origin, MARKER_RADIUS, self.color, Stroke::new(2.0, Color32::WHITE));
        painter.circle(
            destination,
            MARKER_RADIUS,
            Color32::WHITE,
            Stroke::new(2.0, self.color),
        );
    }
}
