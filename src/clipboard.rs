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

//! Clipboard-backed share target.

use log::info;
use skyboard_core::share::{ShareError, ShareMessage, ShareOutcome, ShareTarget};

/// Desktop stand-in for a share sheet: copies the message to the clipboard.
#[derive(Debug, Clone)]
pub struct ClipboardShare {
    ctx: egui::Context,
}

impl ClipboardShare {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl ShareTarget for ClipboardShare {
    fn share(&self, message: &ShareMessage) -> Result<ShareOutcome, ShareError> {
        if message.message.is_empty() {
            return Err(ShareError::Unavailable("nothing to share".to_string()));
        }
        self.ctx.copy_text(message.message.clone());
        info!("Copied {} to clipboard", message.title);
        Ok(ShareOutcome::Shared)
    }
}
