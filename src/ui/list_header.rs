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

//! Panel header: drag handle, snap indicator, title row and search field.

use egui::{Align, Layout, RichText, Sense, Stroke};
use skyboard_core::PanelController;

use super::Palette;

/// Height reserved for the header above the flight list.
pub const HEADER_HEIGHT: f32 = 132.0;

const HANDLE_STRIP_HEIGHT: f32 = 34.0;
const HANDLE_WIDTH: f32 = 44.0;
const INDICATOR_RADIUS: f32 = 4.0;

/// Buttons pressed in the header this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderActions {
    pub toggle_theme: bool,
    pub toggle_simulation: bool,
}

/// Render the header. The returned response covers the drag handle strip.
pub fn list_header(
    ui: &mut egui::Ui,
    panel: &PanelController,
    palette: &Palette,
    query: &mut String,
    flight_count: usize,
    simulating: bool,
) -> (egui::Response, HeaderActions) {
    let mut actions = HeaderActions::default();

    let (rect, handle) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), HANDLE_STRIP_HEIGHT),
        Sense::click_and_drag(),
    );
    let painter = ui.painter();
    let center = rect.center();
    painter.line_segment(
        [
            center - egui::vec2(HANDLE_WIDTH / 2.0, 4.0),
            center + egui::vec2(HANDLE_WIDTH / 2.0, -4.0),
        ],
        Stroke::new(5.0, palette.handle),
    );
    painter.circle_filled(
        center + egui::vec2(panel.indicator_offset(), 8.0),
        INDICATOR_RADIUS,
        palette.accent,
    );
    let handle = handle.on_hover_text("Drag to move, double-click to snap");

    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Flights")
                .color(palette.text)
                .size(20.0)
                .strong(),
        );
        ui.label(
            RichText::new(format!("{flight_count} · {}", panel.snap_state().label()))
                .color(palette.muted)
                .size(11.0),
        );

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui
                .button(RichText::new("◐").size(14.0))
                .on_hover_text("Toggle theme")
                .clicked()
            {
                actions.toggle_theme = true;
            }

            let (icon, hint) = if simulating {
                ("⏸", "Pause simulated updates")
            } else {
                ("▶", "Resume simulated updates")
            };
            if ui
                .button(RichText::new(icon).size(14.0))
                .on_hover_text(hint)
                .clicked()
            {
                actions.toggle_simulation = true;
            }
        });
    });

    ui.add_space(6.0);
    ui.add(
        egui::TextEdit::singleline(query)
            .hint_text("Search by airline, flight or city")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(6.0);

    (handle, actions)
}
