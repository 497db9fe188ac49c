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

//! Tile map background.

use log::{debug, warn};
use skyboard_core::route::{zoom_for_span, RouteFocus, FOCUS_SPAN_DEGREES, INITIAL_SPAN_DEGREES};
use skyboard_core::Theme;
use walkers::{lon_lat, HttpOptions, HttpTiles, Map, MapMemory, Position, Tiles};

use super::{Palette, RouteOverlay};
use crate::carto_tiles::CartoTileSource;

fn tile_options() -> HttpOptions {
    HttpOptions {
        cache: dirs::cache_dir().map(|dir| dir.join("skyboard-desktop").join("tiles")),
        ..Default::default()
    }
}

/// Map with one tile cache per theme so switching does not refetch.
pub struct MapView {
    light: HttpTiles,
    dark: HttpTiles,
    memory: MapMemory,
    home: Position,
    pending_zoom: Option<f64>,
    route: Option<RouteFocus>,
}

impl std::fmt::Debug for MapView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("zoom", &self.memory.zoom())
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

impl MapView {
    /// `center` is `(lat, lon)`.
    pub fn new(ctx: &egui::Context, center: (f64, f64)) -> Self {
        Self {
            light: HttpTiles::with_options(
                CartoTileSource::new(Theme::Light),
                tile_options(),
                ctx.clone(),
            ),
            dark: HttpTiles::with_options(
                CartoTileSource::new(Theme::Dark),
                tile_options(),
                ctx.clone(),
            ),
            memory: MapMemory::default(),
            home: lon_lat(center.1, center.0),
            pending_zoom: Some(INITIAL_SPAN_DEGREES),
            route: None,
        }
    }

    /// Center on the route's origin, zoom in and draw the route.
    pub fn focus(&mut self, route: &RouteFocus) {
        let (lat, lon) = route.center();
        debug!("Focusing map on {:.3}, {:.3}", lat, lon);
        self.memory.center_at(lon_lat(lon, lat));
        self.pending_zoom = Some(FOCUS_SPAN_DEGREES);
        self.route = Some(*route);
    }

    /// Remove the drawn route. The camera stays where it is.
    pub fn clear_route(&mut self) {
        self.route = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: Theme) {
        if let Some(span) = self.pending_zoom.take() {
            let zoom = zoom_for_span(span, f64::from(ui.available_width()));
            if self.memory.set_zoom(zoom).is_err() {
                warn!("Map zoom {:.1} out of range", zoom);
            }
        }

        let tiles: &mut dyn Tiles = if theme.is_dark() {
            &mut self.dark
        } else {
            &mut self.light
        };
        let mut map = Map::new(Some(tiles), &mut self.memory, self.home);
        if let Some(route) = self.route {
            map = map.with_plugin(RouteOverlay::new(route, Palette::for_theme(theme).accent));
        }
        ui.add(map);
    }
}
