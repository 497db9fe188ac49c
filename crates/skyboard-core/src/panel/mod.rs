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

//! Draggable bottom panel position and snap state.
//!
//! The panel offset is the distance from the top of the viewport to the
//! panel's top edge. Dragging tracks the pointer directly; double-tapping the
//! header cycles through three snap targets with a spring animation. The
//! offset never leaves `[top_offset, lower_offset]`.

mod spring;

pub use spring::{Spring, DEFAULT_FREQUENCY};

use std::time::Duration;

use log::debug;

/// Panel height as a share of the viewport height.
pub const PANEL_HEIGHT_RATIO: f32 = 0.95;
/// Distance from the panel bottom to its top snap point.
pub const TOP_SNAP_DISTANCE: f32 = 760.0;
/// Panel height left showing above the viewport bottom at the default snap.
pub const DEFAULT_VISIBLE_HEIGHT: f32 = 360.0;
/// Margin between the lowered panel edge and the viewport bottom.
pub const LOWER_MARGIN: f32 = 100.0;

/// Discrete panel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SnapState {
    Top,
    #[default]
    Default,
    Lower,
}

impl SnapState {
    /// Next state in the double-tap cycle: default → lower → top → default.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            SnapState::Default => SnapState::Lower,
            SnapState::Lower => SnapState::Top,
            SnapState::Top => SnapState::Default,
        }
    }

    /// Horizontal offset of the header indicator for this state.
    #[must_use]
    pub fn indicator_offset(self) -> f32 {
        match self {
            SnapState::Top => -90.0,
            SnapState::Default => 0.0,
            SnapState::Lower => 90.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SnapState::Top => "top",
            SnapState::Default => "default",
            SnapState::Lower => "lower",
        }
    }
}

/// Snap offsets derived from the viewport height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    viewport_height: f32,
    top_offset: f32,
    default_offset: f32,
    lower_offset: f32,
}

impl PanelLayout {
    /// Derive the layout for a viewport of height `viewport_height`.
    ///
    /// Snap targets are pulled into the legal range so that every target
    /// respects the bounds, whatever the device height.
    #[must_use]
    pub fn for_viewport(viewport_height: f32) -> Self {
        let panel_height = viewport_height * PANEL_HEIGHT_RATIO;
        let lower_offset = viewport_height - LOWER_MARGIN;
        let top_offset = (panel_height - TOP_SNAP_DISTANCE).min(lower_offset);
        let resting_offset = viewport_height - (panel_height - DEFAULT_VISIBLE_HEIGHT);
        let default_offset = resting_offset.clamp(top_offset, lower_offset);

        Self {
            viewport_height,
            top_offset,
            default_offset,
            lower_offset,
        }
    }

    #[must_use]
    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    #[must_use]
    pub fn top_offset(&self) -> f32 {
        self.top_offset
    }

    #[must_use]
    pub fn default_offset(&self) -> f32 {
        self.default_offset
    }

    #[must_use]
    pub fn lower_offset(&self) -> f32 {
        self.lower_offset
    }

    /// Target offset for a snap state.
    #[must_use]
    pub fn offset_for(&self, state: SnapState) -> f32 {
        match state {
            SnapState::Top => self.top_offset,
            SnapState::Default => self.default_offset,
            SnapState::Lower => self.lower_offset,
        }
    }

    /// Clamp an offset into the legal range.
    #[must_use]
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(self.top_offset, self.lower_offset)
    }
}

/// Panel position state machine.
#[derive(Debug, Clone)]
pub struct PanelController {
    layout: PanelLayout,
    offset: Spring,
    indicator: Spring,
    snap: SnapState,
    drag_anchor: Option<f32>,
}

impl PanelController {
    /// Start at the default snap point.
    #[must_use]
    pub fn new(layout: PanelLayout) -> Self {
        let snap = SnapState::Default;
        Self {
            layout,
            offset: Spring::new(layout.offset_for(snap)),
            indicator: Spring::new(snap.indicator_offset()),
            snap,
            drag_anchor: None,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Current offset from the top of the viewport.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.layout.clamp(self.offset.position())
    }

    #[must_use]
    pub fn snap_state(&self) -> SnapState {
        self.snap
    }

    /// Current header indicator x-offset.
    #[must_use]
    pub fn indicator_offset(&self) -> f32 {
        self.indicator.position()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.offset.is_settled() || !self.indicator.is_settled()
    }

    /// Height left for list content below a header of `header_height`.
    #[must_use]
    pub fn content_height(&self, header_height: f32) -> f32 {
        (self.layout.viewport_height - self.offset() - header_height).max(0.0)
    }

    /// Begin a drag: remember where the panel is and stop any animation.
    pub fn drag_start(&mut self) {
        self.offset.halt();
        self.drag_anchor = Some(self.offset());
    }

    /// Follow the pointer: `delta_y` is the total movement since drag start.
    pub fn drag_update(&mut self, delta_y: f32) {
        let anchor = match self.drag_anchor {
            Some(anchor) => anchor,
            None => {
                self.drag_start();
                self.offset()
            }
        };
        self.offset.set(self.layout.clamp(anchor + delta_y));
    }

    /// End a drag. The panel rests where it was released.
    pub fn drag_end(&mut self) {
        self.drag_anchor = None;
    }

    /// Advance to the next snap state and animate there.
    pub fn double_tap(&mut self) {
        self.drag_anchor = None;
        self.snap = self.snap.next();
        let target = self.layout.offset_for(self.snap);
        debug!("Panel snapping to {} ({:.0})", self.snap.label(), target);
        self.offset.animate_to(target);
        self.indicator.animate_to(self.snap.indicator_offset());
    }

    /// Advance animations by `dt`. Returns true while anything is still moving.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let moving = self.offset.step(dt);
        let indicator_moving = self.indicator.step(dt);
        moving || indicator_moving
    }

    /// Re-derive the layout for a new viewport height.
    ///
    /// A panel resting on its snap target moves to the new target; anything
    /// else is clamped into the new range.
    pub fn resize(&mut self, viewport_height: f32) {
        #[allow(clippy::float_cmp, reason = "exact equality means resting on the target")]
        let at_target = self.offset.is_settled()
            && self.drag_anchor.is_none()
            && self.offset.position() == self.layout.offset_for(self.snap);

        self.layout = PanelLayout::for_viewport(viewport_height);

        if at_target {
            self.offset.set(self.layout.offset_for(self.snap));
        } else if self.offset.is_settled() {
            self.offset.set(self.layout.clamp(self.offset.position()));
        } else {
            self.offset.animate_to(self.layout.offset_for(self.snap));
        }
        if let Some(anchor) = self.drag_anchor {
            self.drag_anchor = Some(self.layout.clamp(anchor));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEIGHT: f32 = 900.0;
    const FRAME: Duration = Duration::from_millis(16);

    fn settle(panel: &mut PanelController) {
        let mut frames = 0;
        while panel.advance(FRAME) {
            let layout = *panel.layout();
            assert!(panel.offset() >= layout.top_offset());
            assert!(panel.offset() <= layout.lower_offset());
            frames += 1;
            assert!(frames < 2000, "panel never settled");
        }
    }

    #[test]
    fn layout_constants() {
        let layout = PanelLayout::for_viewport(HEIGHT);
        // panel height 855
        assert!((layout.top_offset() - 95.0).abs() < 1e-3);
        assert!((layout.default_offset() - 405.0).abs() < 1e-3);
        assert!((layout.lower_offset() - 800.0).abs() < 1e-3);
    }

    #[test]
    fn snap_targets_stay_in_range_on_tall_viewports() {
        let layout = PanelLayout::for_viewport(2400.0);
        assert!(layout.default_offset() >= layout.top_offset());
        assert!(layout.default_offset() <= layout.lower_offset());
        assert!(layout.top_offset() <= layout.lower_offset());

        let tiny = PanelLayout::for_viewport(120.0);
        assert!(tiny.top_offset() <= tiny.lower_offset());
    }

    #[test]
    fn starts_at_default() {
        let panel = PanelController::new(PanelLayout::for_viewport(HEIGHT));
        assert_eq!(panel.snap_state(), SnapState::Default);
        assert!((panel.offset() - 405.0).abs() < 1e-3);
        assert!(!panel.is_animating());
    }

    #[test]
    fn drag_is_relative_to_anchor_and_clamped() {
        let mut panel = PanelController::new(PanelLayout::for_viewport(HEIGHT));
        let layout = *panel.layout();

        panel.drag_start();
        panel.drag_update(50.0);
        assert!((panel.offset() - 455.0).abs() < 1e-3);
        panel.drag_update(-20.0);
        assert!((panel.offset() - 385.0).abs() < 1e-3);
        panel.drag_update(10_000.0);
        assert_eq!(panel.offset(), layout.lower_offset());
        panel.drag_update(-10_000.0);
        assert_eq!(panel.offset(), layout.top_offset());
        panel.drag_end();

        // Panel rests where released and the snap state is untouched.
        assert_eq!(panel.offset(), layout.top_offset());
        assert_eq!(panel.snap_state(), SnapState::Default);
        assert!(!panel.is_dragging());
    }

    #[test]
    fn arbitrary_drag_sequences_stay_in_bounds() {
        let mut panel = PanelController::new(PanelLayout::for_viewport(HEIGHT));
        let layout = *panel.layout();
        let mut delta = 0.0_f32;

        for step in 0..500 {
            if step % 37 == 0 {
                panel.drag_end();
                panel.drag_start();
                delta = 0.0;
            }
            // Deterministic wander with large swings.
            delta += ((step * 7919) % 401) as f32 - 200.0;
            panel.drag_update(delta * 3.0);
            assert!(panel.offset() >= layout.top_offset());
            assert!(panel.offset() <= layout.lower_offset());
        }
    }

    #[test]
    fn drag_update_without_start_anchors_at_current_offset() {
        let mut panel = PanelController::new(PanelLayout::for_viewport(HEIGHT));
        panel.drag_update(10.0);
        assert!((panel.offset() - 415.0).abs() < 1e-3);
        panel.drag_update(20.0);
        assert!((panel.offset() - 425.0).abs() < 1e-3);
    }

    #[test]
    fn double_tap_cycles_lower_top_default() {
        let mut panel = PanelController::new(PanelLayout::for_viewport(HEIGHT));
        let layout = *panel.layout();

        let expected = [
            (SnapState::Lower, layout.lower_offset(), 90.0),
            (SnapState::Top, layout.top_offset(), -90.0),
            (SnapState::Default, layout.default_offset(), 0.0),
        ];
        for (state, offset, indicator) in expected {
            panel.double_tap();
            assert_eq!(panel.snap_state(), state);
            assert!(panel.is_animating());
            settle(&mut panel);
            assert_eq!(panel.offset(), offset);
            assert_eq!(panel.indicator_offset(), indicator);
        }
    }

    #[test]
    fn drag_start_interrupts_animation() {
        let mut panel = PanelController::new(PanelLayout::for_viewport(HEIGHT));
        panel.double_tap();
        panel.advance(Duration::from_millis(100));
        let mid = panel.offset();
        assert!(mid > 405.0 && mid < 800.0);

        panel.drag_start();
        panel.advance(Duration::from_millis(100));
        assert_eq!(panel.offset(), mid);
        panel.drag_update(5.0);
        assert!((panel.offset() - (mid + 5.0)).abs() < 1e-3);
    }

    #[test]
    fn content_height_tracks_offset() {
        let mut panel = PanelController::new(PanelLayout::for_viewport(HEIGHT));
        assert!((panel.content_height(120.0) - (900.0 - 405.0 - 120.0)).abs() < 1e-3);

        panel.drag_start();
        panel.drag_update(10_000.0);
        assert_eq!(panel.content_height(120.0), 0.0);
    }

    #[test]
    fn resize_moves_resting_panel_to_new_target() {
        let mut panel = PanelController::new(PanelLayout::for_viewport(HEIGHT));
        panel.resize(1000.0);
        assert_eq!(panel.offset(), panel.layout().default_offset());

        panel.drag_start();
        panel.drag_update(10_000.0);
        panel.drag_end();
        panel.resize(700.0);
        assert_eq!(panel.offset(), panel.layout().lower_offset());
    }
}
