use std::ops::Range;

use crate::interaction::{ViewportController, ViewportEvent, ViewportWindow, ZoomDirection};

use super::IssueChart;

impl IssueChart {
    #[must_use]
    pub fn viewport(&self) -> ViewportController {
        self.viewport
    }

    #[must_use]
    pub fn viewport_window(&self) -> ViewportWindow {
        self.viewport.window()
    }

    /// Index range of the aggregated series currently on screen.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.viewport.visible_range(self.aggregation.len())
    }

    pub fn zoom(&mut self, direction: ZoomDirection, pointer_fraction: f64) {
        self.viewport.zoom(direction, pointer_fraction);
    }

    /// Returns `false` when the wheel delta carries no direction.
    pub fn wheel_zoom(&mut self, delta_y: f64, pointer_fraction: f64) -> bool {
        self.viewport.wheel_zoom(delta_y, pointer_fraction)
    }

    pub fn begin_brush(&mut self, index: usize) {
        self.viewport.begin_brush(index);
    }

    pub fn update_brush(&mut self, index: usize) {
        self.viewport.update_brush(index);
    }

    pub fn finish_brush(&mut self) -> bool {
        self.viewport.finish_brush(self.aggregation.len())
    }

    /// Brush over aggregated series positions (inclusive).
    pub fn set_brush(&mut self, start_index: usize, end_index: usize) {
        self.viewport
            .set_brush(start_index, end_index, self.aggregation.len());
    }

    pub fn pan_by(&mut self, delta_percent: f64) {
        self.viewport.pan_by(delta_percent);
    }

    pub fn reset_viewport(&mut self) {
        self.viewport.reset();
    }

    pub fn apply_viewport_event(&mut self, event: ViewportEvent) {
        self.viewport = self.viewport.apply(event);
    }
}
