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

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, error, info};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::queue::{drain_loop, NotificationQueue, Notifier};
use super::{default_rules, NotificationItem, RandomDraws, StatusRule, TickEngine};
use crate::flight::{FlightBoard, SharedBoard};

/// Timing and rules for the simulation.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Period between simulated update batches.
    pub tick_interval: Duration,
    /// Minimum delay between two delivered notifications.
    pub notification_gap: Duration,
    /// Per-flight mutation rules.
    pub rules: Vec<StatusRule>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(7000),
            notification_gap: Duration::from_millis(5000),
            rules: default_rules(),
        }
    }
}

/// A running tick timer.
#[derive(Debug)]
struct Ticker {
    cancel_token: CancellationToken,
    task: JoinHandle<()>,
}

/// Owns the simulation lifecycle: the tick timer and the notification drain.
///
/// `start`/`stop` control only the tick timer. The drain keeps delivering
/// whatever is already queued until [`SimulationController::dispose`] (or drop).
pub struct SimulationController {
    runtime: Handle,
    board: SharedBoard,
    engine: Arc<Mutex<TickEngine>>,
    queue: NotificationQueue,
    tick_interval: Duration,
    ticker: Option<Ticker>,
    drain_cancel: CancellationToken,
    drain_task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for SimulationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationController")
            .field("running", &self.is_running())
            .field("pending", &self.queue.len())
            .field("tick_interval", &self.tick_interval)
            .finish_non_exhaustive()
    }
}

impl SimulationController {
    /// Create a controller using random draws. The drain loop starts immediately.
    #[must_use]
    pub fn new(
        runtime: Handle,
        board: SharedBoard,
        notifier: Arc<dyn Notifier>,
        config: SimulationConfig,
    ) -> Self {
        Self::with_engine(
            runtime,
            board,
            notifier,
            config.tick_interval,
            config.notification_gap,
            TickEngine::new(config.rules, Box::new(RandomDraws::from_entropy())),
        )
    }

    /// Create a controller around a prepared engine (custom draws or rules).
    #[must_use]
    pub fn with_engine(
        runtime: Handle,
        board: SharedBoard,
        notifier: Arc<dyn Notifier>,
        tick_interval: Duration,
        notification_gap: Duration,
        engine: TickEngine,
    ) -> Self {
        let queue = NotificationQueue::new();
        let drain_cancel = CancellationToken::new();
        let drain_task = runtime.spawn(drain_loop(
            queue.clone(),
            notifier,
            notification_gap,
            drain_cancel.clone(),
        ));

        Self {
            runtime,
            board,
            engine: Arc::new(Mutex::new(engine)),
            queue,
            tick_interval,
            ticker: None,
            drain_cancel,
            drain_task: Some(drain_task),
        }
    }

    /// Start the tick timer. No-op when already running or when the interval is zero.
    pub fn start(&mut self) {
        if self.is_running() {
            debug!("Simulation already running");
            return;
        }
        if self.tick_interval.is_zero() {
            error!("Simulation not started: tick interval must be non-zero");
            return;
        }

        info!("Simulation started");
        let cancel_token = CancellationToken::new();
        let task_cancel = cancel_token.clone();
        let board = Arc::clone(&self.board);
        let engine = Arc::clone(&self.engine);
        let queue = self.queue.clone();
        let period = self.tick_interval;

        let task = self.runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        debug!("Simulating flight data update...");
                        run_tick(&board, &engine, &queue);
                    }
                    () = task_cancel.cancelled() => return,
                }
            }
        });

        self.ticker = Some(Ticker { cancel_token, task });
    }

    /// Stop the tick timer. No-op when not running. Queued notifications still drain.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel_token.cancel();
            info!("Simulation stopped");
        } else {
            debug!("Simulation already stopped");
        }
    }

    /// Toggle between running and stopped; returns the new state.
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.is_running()
    }

    /// Whether the tick timer is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|t| !t.cancel_token.is_cancelled() && !t.task.is_finished())
    }

    /// Run one batch immediately, outside the timer.
    pub fn tick(&self) -> Option<NotificationItem> {
        run_tick(&self.board, &self.engine, &self.queue)
    }

    /// The shared flight board.
    #[must_use]
    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// The pending notification queue.
    #[must_use]
    pub fn queue(&self) -> &NotificationQueue {
        &self.queue
    }

    /// Cancel both the tick timer and the drain loop.
    pub fn dispose(&mut self) {
        self.stop();
        if let Some(task) = self.drain_task.take() {
            self.drain_cancel.cancel();
            debug!("Notification drain disposed ({} undelivered)", self.queue.len());
            drop(task);
        }
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn run_tick(
    board: &SharedBoard,
    engine: &Mutex<TickEngine>,
    queue: &NotificationQueue,
) -> Option<NotificationItem> {
    let mut engine = engine.lock().unwrap_or_else(PoisonError::into_inner);
    let mut board = FlightBoard::write(board);
    engine.tick(&mut board, queue)
}
