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

//! Background tokio runtime for timers and network requests.
//!
//! egui owns the main thread, so async work runs on a current-thread runtime
//! driven by one dedicated thread until the app shuts down.

use std::thread::JoinHandle;

use log::{debug, warn};
use tokio::runtime::{Builder, Handle};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct BackgroundRuntime {
    handle: Handle,
    cancel_token: CancellationToken,
    thread: Option<JoinHandle<()>>,
}

impl BackgroundRuntime {
    pub fn spawn() -> std::io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let handle = runtime.handle().clone();
        let cancel_token = CancellationToken::new();
        let shutdown = cancel_token.clone();

        let thread = std::thread::Builder::new()
            .name("skyboard-runtime".to_string())
            .spawn(move || {
                runtime.block_on(shutdown.cancelled());
                debug!("Background runtime stopped");
            })?;

        Ok(Self {
            handle,
            cancel_token,
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> Handle {
        self.handle.clone()
    }
}

impl Drop for BackgroundRuntime {
    fn drop(&mut self) {
        self.cancel_token.cancel();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Background runtime thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn spawned_tasks_run_on_background_thread() {
        let runtime = BackgroundRuntime::spawn().unwrap();
        let (tx, rx) = mpsc::channel();

        runtime.handle().spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            tx.send(std::thread::current().name().map(str::to_string))
                .unwrap();
        });

        let name = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(name.as_deref(), Some("skyboard-runtime"));
        drop(runtime);
    }
}
