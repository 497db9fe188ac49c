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

//! The flight board screen: map background, draggable panel, banners and alerts.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{error, info, warn};
use skyboard_core::flight::{seed_flights, shared_board, FlightBoard, SharedBoard};
use skyboard_core::permission::PermissionGate;
use skyboard_core::route::RouteSelection;
use skyboard_core::search::filter_flights;
use skyboard_core::service::FlightService;
use skyboard_core::share::{ShareGuard, ShareOutcome};
use skyboard_core::simulation::{DrawSource, RandomDraws, SimulationController, TickEngine};
use skyboard_core::theme::ThemeState;
use skyboard_core::{PanelController, PanelLayout, Theme};

use crate::clipboard::ClipboardShare;
use crate::config::AppConfig;
use crate::notifier::{BannerBoard, BannerNotifier, BANNER_DURATION};
use crate::runtime::BackgroundRuntime;
use crate::ui::{self, HeaderActions, MapView, Palette, RowAction, HEADER_HEIGHT};

/// Longest frame step fed to the panel springs.
const MAX_FRAME_STEP: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Alert {
    title: String,
    message: String,
}

impl Alert {
    fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

/// Run-time options that do not live in the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    /// Seed for reproducible simulated updates
    pub seed: Option<u64>,
}

pub struct FlightScreen {
    config: AppConfig,
    panel: PanelController,
    drag_total: f32,
    theme: ThemeState,
    query: String,
    selection: RouteSelection,
    map: MapView,
    share_guard: ShareGuard,
    share_target: ClipboardShare,
    alerts: VecDeque<Alert>,
    banners: BannerBoard,
    board: SharedBoard,
    // Dropped before the runtime that drives it.
    simulation: SimulationController,
    runtime: BackgroundRuntime,
}

impl std::fmt::Debug for FlightScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlightScreen")
            .field("theme", &self.theme.current())
            .field("snap", &self.panel.snap_state())
            .field("simulation", &self.simulation)
            .finish_non_exhaustive()
    }
}

impl FlightScreen {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        options: LaunchOptions,
    ) -> std::io::Result<Self> {
        let ctx = cc.egui_ctx.clone();
        let runtime = BackgroundRuntime::spawn()?;
        let board = shared_board(FlightBoard::new(seed_flights()));

        let banners = BannerBoard::default();
        let notifier = Arc::new(BannerNotifier::new(
            banners.clone(),
            config.notifications_enabled,
            Some(ctx.clone()),
        ));

        let mut alerts = VecDeque::new();
        let mut permission = PermissionGate::new();
        permission.request(notifier.as_ref());
        if let Some((title, message)) = permission.take_alert() {
            alerts.push_back(Alert::new(title, message));
        }

        let draws: Box<dyn DrawSource> = match options.seed {
            Some(seed) => {
                info!("Using seeded simulation (seed {})", seed);
                Box::new(RandomDraws::seeded(seed))
            }
            None => Box::new(RandomDraws::from_entropy()),
        };
        let sim_config = config.simulation();
        let mut simulation = SimulationController::with_engine(
            runtime.handle(),
            Arc::clone(&board),
            notifier,
            sim_config.tick_interval,
            sim_config.notification_gap,
            TickEngine::new(sim_config.rules, draws),
        );
        if config.simulate_updates {
            simulation.start();
        }

        let viewport_height = ctx.screen_rect().height().max(config.window_height);
        let theme = ThemeState::new(config.theme);
        ctx.set_visuals(visuals_for(theme.current()));

        let screen = Self {
            map: MapView::new(&ctx, (config.map_latitude, config.map_longitude)),
            share_guard: ShareGuard::new(config.share_cooldown()),
            share_target: ClipboardShare::new(ctx),
            panel: PanelController::new(PanelLayout::for_viewport(viewport_height)),
            drag_total: 0.0,
            theme,
            query: String::new(),
            selection: RouteSelection::default(),
            alerts,
            banners,
            board,
            simulation,
            runtime,
            config,
        };
        if screen.config.use_remote_data {
            screen.refresh_remote(&cc.egui_ctx);
        }
        Ok(screen)
    }

    /// Replace the board with flights from the remote API, in the background.
    fn refresh_remote(&self, ctx: &egui::Context) {
        let service = match FlightService::new(self.config.service()) {
            Ok(service) => service,
            Err(e) => {
                error!("Failed to create flight service: {}", e);
                return;
            }
        };
        let board = Arc::clone(&self.board);
        let ctx = ctx.clone();

        self.runtime.handle().spawn(async move {
            match service.fetch_flights().await {
                Ok(flights) if flights.is_empty() => {
                    warn!("No flights returned, keeping built-in data");
                }
                Ok(flights) => {
                    FlightBoard::write(&board).replace(flights);
                    ctx.request_repaint();
                }
                Err(e) => error!("Error fetching flights: {}", e),
            }
        });
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        let theme = self.theme.toggle();
        ctx.set_visuals(visuals_for(theme));
        self.config.theme = theme;
        if let Err(e) = self.config.save() {
            warn!("Failed to save theme preference: {}", e);
        }
    }

    fn sync_system_theme(&mut self, ctx: &egui::Context) {
        let system = ctx.system_theme().map(|t| match t {
            egui::Theme::Dark => Theme::Dark,
            egui::Theme::Light => Theme::Light,
        });
        if self.theme.sync_system(system) {
            ctx.set_visuals(visuals_for(self.theme.current()));
        }
    }

    fn handle_header(&mut self, handle: &egui::Response) {
        if handle.double_clicked() {
            self.panel.double_tap();
            return;
        }
        if handle.drag_started() {
            self.drag_total = 0.0;
            self.panel.drag_start();
        }
        if handle.dragged() {
            self.drag_total += handle.drag_delta().y;
            self.panel.drag_update(self.drag_total);
        }
        if handle.drag_stopped() {
            self.panel.drag_end();
        }
    }

    fn handle_row(&mut self, flight_id: &str, action: RowAction) {
        let flight = FlightBoard::read(&self.board).get(flight_id).cloned();
        let Some(flight) = flight else {
            return;
        };

        match action {
            RowAction::Focus => {
                match self.selection.select(&flight) {
                    Some(route) => self.map.focus(&route),
                    None => self.map.clear_route(),
                }
            }
            RowAction::Share => {
                match self
                    .share_guard
                    .share(&self.share_target, &flight, Instant::now())
                {
                    Ok(Some(ShareOutcome::Shared)) => self.alerts.push_back(Alert::new(
                        "Success",
                        "Flight details shared successfully!",
                    )),
                    Ok(Some(ShareOutcome::Dismissed) | None) => {}
                    Err(_) => self.alerts.push_back(Alert::new(
                        "Error",
                        "Failed to share flight details. Please try again.",
                    )),
                }
            }
        }
    }

    fn render_panel(&mut self, ctx: &egui::Context, screen: egui::Rect) {
        let palette = Palette::for_theme(self.theme.current());
        let flights = FlightBoard::read(&self.board).flights().to_vec();
        let visible = filter_flights(&flights, &self.query);
        let list_height = self.panel.content_height(HEADER_HEIGHT);

        let mut header_response = None;
        let mut actions = HeaderActions::default();
        let mut row_action = None;

        egui::Area::new(egui::Id::new("flight_panel"))
            .fixed_pos(egui::pos2(screen.left(), screen.top() + self.panel.offset()))
            .order(egui::Order::Middle)
            .movable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(palette.panel_fill)
                    .corner_radius(egui::CornerRadius {
                        nw: 16,
                        ne: 16,
                        sw: 0,
                        se: 0,
                    })
                    .inner_margin(egui::Margin::symmetric(12, 0))
                    .show(ui, |ui| {
                        ui.set_width(screen.width() - 24.0);
                        ui.set_min_height(screen.height() - self.panel.offset());

                        let (handle, header) = ui::list_header(
                            ui,
                            &self.panel,
                            &palette,
                            &mut self.query,
                            visible.len(),
                            self.simulation.is_running(),
                        );
                        header_response = Some(handle);
                        actions = header;

                        egui::ScrollArea::vertical()
                            .max_height(list_height)
                            .show(ui, |ui| {
                                if visible.is_empty() {
                                    ui.label(
                                        egui::RichText::new("No flights match your search")
                                            .color(palette.muted),
                                    );
                                }
                                for flight in &visible {
                                    let selected = self.selection.is_selected(&flight.id);
                                    if let Some(action) =
                                        ui::flight_row(ui, flight, selected, &palette)
                                    {
                                        row_action = Some((flight.id.clone(), action));
                                    }
                                    ui.add_space(4.0);
                                }
                            });
                    });
            });

        if let Some(handle) = header_response {
            self.handle_header(&handle);
        }
        if actions.toggle_theme {
            self.toggle_theme(ctx);
        }
        if actions.toggle_simulation {
            self.simulation.toggle();
        }
        if let Some((id, action)) = row_action {
            self.handle_row(&id, action);
        }
    }

    fn render_banners(&self, ctx: &egui::Context) {
        let palette = Palette::for_theme(self.theme.current());
        let banners = self.banners.visible(Instant::now());
        if banners.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("notification_banners"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 12.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for banner in banners.iter().rev() {
                    egui::Frame::window(&ctx.style())
                        .fill(palette.row_fill)
                        .corner_radius(10.0)
                        .show(ui, |ui| {
                            ui.set_width(320.0);
                            ui.label(
                                egui::RichText::new(&banner.title)
                                    .color(palette.text)
                                    .strong(),
                            );
                            ui.label(egui::RichText::new(&banner.body).color(palette.muted));
                        });
                    ui.add_space(6.0);
                }
            });
        ctx.request_repaint_after(BANNER_DURATION);
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.alerts.front().cloned() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new(alert.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.label(alert.message.as_str());
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.alerts.pop_front();
        }
    }
}

impl eframe::App for FlightScreen {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_system_theme(ctx);

        let screen = ctx.screen_rect();
        if (screen.height() - self.panel.layout().viewport_height()).abs() > 0.5 {
            self.panel.resize(screen.height());
        }

        let dt = Duration::from_secs_f32(ctx.input(|i| i.stable_dt)).min(MAX_FRAME_STEP);
        if self.panel.advance(dt) {
            ctx.request_repaint();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.map.show(ui, self.theme.current());
            });

        self.render_panel(ctx, screen);
        self.render_banners(ctx);
        self.render_alert(ctx);

        // Board changes arrive from the runtime thread.
        ctx.request_repaint_after(Duration::from_secs(1));
    }
}

fn visuals_for(theme: Theme) -> egui::Visuals {
    if theme.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    }
}
