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

use egui::{Align, Layout, RichText, Sense};
use skyboard_core::flight::{format_time, Flight};

use super::{status_color, Palette};

/// What the user did with a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Focus,
    Share,
}

pub fn flight_row(
    ui: &mut egui::Ui,
    flight: &Flight,
    selected: bool,
    palette: &Palette,
) -> Option<RowAction> {
    let mut action = None;
    let fill = if selected {
        palette.row_selected
    } else {
        palette.row_fill
    };

    egui::Frame::group(ui.style())
        .fill(fill)
        .corner_radius(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(&flight.airline_logo).size(18.0));
                ui.vertical(|ui| {
                    let title = ui
                        .add(
                            egui::Label::new(
                                RichText::new(flight.display_name())
                                    .color(palette.text)
                                    .size(13.0)
                                    .strong(),
                            )
                            .sense(Sense::click()),
                        )
                        .on_hover_text("Show route on map");
                    if title.clicked() {
                        action = Some(RowAction::Focus);
                    }
                    ui.label(
                        RichText::new(flight.route_label())
                            .color(palette.muted)
                            .size(11.0),
                    );
                });

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .small_button("Share")
                        .on_hover_text("Copy flight details")
                        .clicked()
                    {
                        action = Some(RowAction::Share);
                    }
                    ui.label(
                        RichText::new(flight.status.as_str())
                            .color(status_color(flight.status))
                            .size(11.0)
                            .strong(),
                    );
                });
            });

            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 10.0;
                ui.label(
                    RichText::new(format!("DEP {}", format_time(flight.departure_time)))
                        .color(palette.muted)
                        .size(10.0)
                        .monospace(),
                );
                ui.label(
                    RichText::new(format!("GATE {}", flight.destination.gate))
                        .color(palette.muted)
                        .size(10.0)
                        .monospace(),
                );
                if !flight.time_to_event_major.is_empty() {
                    ui.label(
                        RichText::new(format!(
                            "{} {}",
                            flight.time_to_event_major, flight.time_to_event_minor
                        ))
                        .color(palette.accent)
                        .size(10.0),
                    );
                }
            });
        });

    action
}
