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

//! FIFO notification queue and its rate-limited drain loop.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;
use tokio::sync::Notify;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use super::notification::NotificationItem;

/// Errors reported by a notification dispatcher.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("notification permission not granted")]
    PermissionDenied,

    #[error("dispatcher unavailable: {0}")]
    Unavailable(String),
}

/// Delivers notifications to the user.
///
/// Delivery is fire-and-forget; implementations must return promptly.
pub trait Notifier: Send + Sync {
    /// Ask for permission to show notifications. Called once at startup.
    fn request_permission(&self) -> bool;

    /// Show a notification.
    fn deliver(&self, title: &str, body: &str) -> Result<(), DispatchError>;
}

#[derive(Debug, Default)]
struct QueueInner {
    items: Mutex<VecDeque<NotificationItem>>,
    ready: Notify,
}

/// Cloneable handle to a shared FIFO of pending notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    inner: Arc<QueueInner>,
}

impl NotificationQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, VecDeque<NotificationItem>> {
        self.inner.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append to the tail and wake the drain loop.
    pub fn push(&self, item: NotificationItem) {
        let len = {
            let mut items = self.items();
            items.push_back(item);
            items.len()
        };
        debug!("Notification queued ({} pending)", len);
        self.inner.ready.notify_one();
    }

    /// Remove and return the head.
    pub fn pop(&self) -> Option<NotificationItem> {
        self.items().pop_front()
    }

    /// Copy of the head without removing it.
    #[must_use]
    pub fn front(&self) -> Option<NotificationItem> {
        self.items().front().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Copy of all pending items, head first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<NotificationItem> {
        self.items().iter().cloned().collect()
    }

    /// Wait until an item is available and pop it.
    pub async fn next(&self) -> NotificationItem {
        loop {
            let notified = self.inner.ready.notified();
            if let Some(item) = self.pop() {
                return item;
            }
            notified.await;
        }
    }
}

/// Deliver queued notifications one at a time with at least `gap` between them.
///
/// Runs until `cancel_token` fires. Failed deliveries are logged and skipped.
pub(crate) async fn drain_loop(
    queue: NotificationQueue,
    notifier: Arc<dyn Notifier>,
    gap: Duration,
    cancel_token: CancellationToken,
) {
    loop {
        let item = tokio::select! {
            item = queue.next() => item,
            () = cancel_token.cancelled() => {
                debug!("Notification drain cancelled while idle");
                return;
            }
        };

        info!("Delivering notification: {}", item.title);
        if let Err(e) = notifier.deliver(&item.title, &item.body) {
            warn!("Failed to deliver notification '{}': {}", item.title, e);
        }

        tokio::select! {
            () = sleep(gap) => {}
            () = cancel_token.cancelled() => {
                debug!("Notification drain cancelled during delay ({} pending)", queue.len());
                return;
            }
        }
    }
}
