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

//! Critically damped spring used for snap animations.

use std::time::Duration;

/// Default natural frequency (rad/s): stiffness 100 over unit mass.
pub const DEFAULT_FREQUENCY: f32 = 10.0;

const REST_DISPLACEMENT: f32 = 0.01;
const REST_SPEED: f32 = 2.0;

/// One-dimensional critically damped spring.
///
/// Stepping uses the closed-form solution, so the result does not depend on
/// how elapsed time is split into frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    position: f32,
    velocity: f32,
    target: f32,
    frequency: f32,
}

impl Spring {
    /// A spring at rest at `position`.
    #[must_use]
    pub fn new(position: f32) -> Self {
        Self::with_frequency(position, DEFAULT_FREQUENCY)
    }

    #[must_use]
    pub fn with_frequency(position: f32, frequency: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
            target: position,
            frequency,
        }
    }

    #[must_use]
    pub fn position(&self) -> f32 {
        self.position
    }

    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }

    /// Start animating toward `target` from the current state.
    pub fn animate_to(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `position` and stop.
    pub fn set(&mut self, position: f32) {
        self.position = position;
        self.target = position;
        self.velocity = 0.0;
    }

    /// Freeze where it is now.
    pub fn halt(&mut self) {
        self.set(self.position);
    }

    /// Advance by `dt`. Returns true while still moving.
    pub fn step(&mut self, dt: Duration) -> bool {
        if self.is_settled() {
            return false;
        }

        let t = dt.as_secs_f32();
        let w = self.frequency;
        let x0 = self.position - self.target;
        let c = self.velocity + w * x0;
        let decay = (-w * t).exp();

        let x = (x0 + c * t) * decay;
        let v = (c - w * (x0 + c * t)) * decay;

        if x.abs() < REST_DISPLACEMENT && v.abs() < REST_SPEED {
            self.set(self.target);
            return false;
        }

        self.position = self.target + x;
        self.velocity = v;
        true
    }
}
