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

//! Map focus and route selection for a selected flight.

use log::warn;

use crate::flight::Flight;

/// Initial map center (latitude, longitude) before any flight is selected.
pub const INITIAL_CENTER: (f64, f64) = (4.2, 102.0);
/// Initial map span in degrees.
pub const INITIAL_SPAN_DEGREES: f64 = 5.5;
/// Span used when zooming to a selected flight's origin.
pub const FOCUS_SPAN_DEGREES: f64 = 2.0;

/// Endpoints of a selected flight, used to place markers and the route line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteFocus {
    pub origin: (f64, f64),
    pub destination: (f64, f64),
}

impl RouteFocus {
    /// Route for `flight`, or `None` (with a warning) when coordinates are missing.
    #[must_use]
    pub fn for_flight(flight: &Flight) -> Option<Self> {
        match (flight.origin.coordinates(), flight.destination.coordinates()) {
            (Some(origin), Some(destination)) => Some(Self {
                origin,
                destination,
            }),
            _ => {
                warn!(
                    "Coordinates not available for flight {}",
                    flight.display_name()
                );
                None
            }
        }
    }

    /// Where the map should center: the origin.
    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        self.origin
    }
}

/// The selected flight and the route drawn for it.
///
/// Selecting a flight without coordinates keeps it highlighted but drops
/// any route left over from an earlier selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSelection {
    flight_id: Option<String>,
    route: Option<RouteFocus>,
}

impl RouteSelection {
    /// Select `flight` and return its route, if it has one.
    pub fn select(&mut self, flight: &Flight) -> Option<RouteFocus> {
        self.flight_id = Some(flight.id.clone());
        self.route = RouteFocus::for_flight(flight);
        self.route
    }

    pub fn clear(&mut self) {
        self.flight_id = None;
        self.route = None;
    }

    #[must_use]
    pub fn flight_id(&self) -> Option<&str> {
        self.flight_id.as_deref()
    }

    #[must_use]
    pub fn route(&self) -> Option<RouteFocus> {
        self.route
    }

    #[must_use]
    pub fn is_selected(&self, flight_id: &str) -> bool {
        self.flight_id() == Some(flight_id)
    }
}

/// Map zoom level showing roughly `span_degrees` of longitude across a
/// viewport `viewport_width` pixels wide (256 px Web Mercator tiles).
#[must_use]
pub fn zoom_for_span(span_degrees: f64, viewport_width: f64) -> f64 {
    let span = span_degrees.clamp(1e-6, 360.0);
    let tiles_across = (viewport_width / 256.0).max(1.0);
    (360.0 * tiles_across / span).log2().clamp(0.0, 19.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::seed_flights;

    #[test]
    fn focus_uses_both_endpoints() {
        let flight = &seed_flights()[3];
        let focus = RouteFocus::for_flight(flight).unwrap();
        assert_eq!(focus.center(), (2.7456, 101.7072));
        assert_eq!(focus.destination, (25.2532, 55.3657));
    }

    #[test]
    fn missing_coordinates_are_a_no_op() {
        let mut flight = seed_flights()[0].clone();
        flight.destination.longitude = None;
        assert!(RouteFocus::for_flight(&flight).is_none());
    }

    #[test]
    fn selecting_without_coordinates_drops_previous_route() {
        let flights = seed_flights();
        let mut selection = RouteSelection::default();

        let route = selection.select(&flights[3]);
        assert!(route.is_some());
        assert_eq!(selection.route(), route);

        let mut missing = flights[0].clone();
        missing.origin.latitude = None;
        assert!(selection.select(&missing).is_none());
        assert!(selection.route().is_none());
        assert!(selection.is_selected(&missing.id));
        assert!(!selection.is_selected(&flights[3].id));

        selection.clear();
        assert_eq!(selection, RouteSelection::default());
    }

    #[test]
    fn zoom_grows_as_span_shrinks() {
        let wide = zoom_for_span(INITIAL_SPAN_DEGREES, 1024.0);
        let close = zoom_for_span(FOCUS_SPAN_DEGREES, 1024.0);
        assert!(close > wide);
        assert!((zoom_for_span(360.0, 256.0)).abs() < 1e-9);
    }
}
