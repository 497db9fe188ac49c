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

//! In-app banner notifications.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use log::debug;
use skyboard_core::simulation::{DispatchError, Notifier};

/// How long a banner stays on screen.
pub const BANNER_DURATION: Duration = Duration::from_secs(4);
const MAX_BANNERS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub title: String,
    pub body: String,
    pub shown_at: Instant,
}

/// Shared list of banners currently on screen, newest last.
#[derive(Debug, Clone, Default)]
pub struct BannerBoard {
    banners: Arc<Mutex<VecDeque<Banner>>>,
}

impl BannerBoard {
    fn banners(&self) -> MutexGuard<'_, VecDeque<Banner>> {
        self.banners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, title: &str, body: &str, now: Instant) {
        let mut banners = self.banners();
        banners.push_back(Banner {
            title: title.to_string(),
            body: body.to_string(),
            shown_at: now,
        });
        while banners.len() > MAX_BANNERS {
            banners.pop_front();
        }
    }

    /// Drop expired banners and return the rest.
    pub fn visible(&self, now: Instant) -> Vec<Banner> {
        let mut banners = self.banners();
        banners.retain(|b| now.saturating_duration_since(b.shown_at) < BANNER_DURATION);
        banners.iter().cloned().collect()
    }
}

/// [`Notifier`] that shows notifications as banners over the map.
///
/// Permission comes from configuration; there is no OS prompt.
#[derive(Debug)]
pub struct BannerNotifier {
    board: BannerBoard,
    permitted: bool,
    repaint: Option<egui::Context>,
}

impl BannerNotifier {
    pub fn new(board: BannerBoard, permitted: bool, repaint: Option<egui::Context>) -> Self {
        Self {
            board,
            permitted,
            repaint,
        }
    }
}

impl Notifier for BannerNotifier {
    fn request_permission(&self) -> bool {
        self.permitted
    }

    fn deliver(&self, title: &str, body: &str) -> Result<(), DispatchError> {
        if !self.permitted {
            return Err(DispatchError::PermissionDenied);
        }
        debug!("Showing banner: {}", title);
        self.board.push(title, body, Instant::now());
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
        Ok(())
    }
}
