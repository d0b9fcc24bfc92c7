use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

pub const FULL_START: f64 = 0.0;
pub const FULL_END: f64 = 100.0;

const DEFAULT_ZOOM_STEP_FACTOR: f64 = 1.1;
const DEFAULT_MIN_WIDTH_PERCENT: f64 = 10.0;

/// Visible part of the series, in percent of its length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportWindow {
    pub start: f64,
    pub end: f64,
}

impl ViewportWindow {
    pub const FULL: Self = Self {
        start: FULL_START,
        end: FULL_END,
    };

    #[must_use]
    pub fn width(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        self.start <= FULL_START && self.end >= FULL_END
    }
}

impl Default for ViewportWindow {
    fn default() -> Self {
        Self::FULL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: negative delta zooms in, positive zooms out.
    #[must_use]
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if !delta_y.is_finite() || delta_y == 0.0 {
            None
        } else if delta_y < 0.0 {
            Some(Self::In)
        } else {
            Some(Self::Out)
        }
    }
}

/// Zoom tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBehavior {
    /// Width divisor for one zoom-in step; zoom-out multiplies by it.
    pub zoom_step_factor: f64,
    /// Narrowest allowed window, in percent.
    pub min_width_percent: f64,
}

impl Default for ViewportBehavior {
    fn default() -> Self {
        Self {
            zoom_step_factor: DEFAULT_ZOOM_STEP_FACTOR,
            min_width_percent: DEFAULT_MIN_WIDTH_PERCENT,
        }
    }
}

impl ViewportBehavior {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.zoom_step_factor.is_finite() || self.zoom_step_factor <= 1.0 {
            return Err(ChartError::InvalidConfig(
                "zoom step factor must be finite and > 1".to_owned(),
            ));
        }
        if !self.min_width_percent.is_finite()
            || self.min_width_percent <= 0.0
            || self.min_width_percent > FULL_END
        {
            return Err(ChartError::InvalidConfig(
                "minimum viewport width must be in (0, 100]".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Brush drag progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum BrushDrag {
    Idle,
    Dragging {
        anchor_index: usize,
        current_index: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    Zoom {
        direction: ZoomDirection,
        pointer_fraction: f64,
    },
    Wheel {
        delta_y: f64,
        pointer_fraction: f64,
    },
    BeginBrush {
        index: usize,
    },
    UpdateBrush {
        index: usize,
    },
    SetBrush {
        start_index: usize,
        end_index: usize,
        series_len: usize,
    },
    Pan {
        delta_percent: f64,
    },
    Reset,
}

/// Single owner of the visible window. Wheel zoom, brush and pan all write here.
///
/// Every operation clamps: the window stays inside `[0, 100]` and never gets
/// narrower than the configured minimum width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportController {
    behavior: ViewportBehavior,
    window: ViewportWindow,
    drag: BrushDrag,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportBehavior::default())
    }
}

impl ViewportController {
    #[must_use]
    pub fn new(behavior: ViewportBehavior) -> Self {
        Self {
            behavior: behavior.validate().unwrap_or_default(),
            window: ViewportWindow::FULL,
            drag: BrushDrag::Idle,
        }
    }

    #[must_use]
    pub fn window(self) -> ViewportWindow {
        self.window
    }

    #[must_use]
    pub fn behavior(self) -> ViewportBehavior {
        self.behavior
    }

    #[must_use]
    pub fn drag(self) -> BrushDrag {
        self.drag
    }

    /// `true` when the window is narrower than the full series.
    #[must_use]
    pub fn is_overridden(self) -> bool {
        !self.window.is_full()
    }

    /// Zooms one step around `pointer_fraction` (0 = left edge, 1 = right edge).
    ///
    /// The series position under the pointer stays under the pointer unless the
    /// window hits a boundary.
    pub fn zoom(&mut self, direction: ZoomDirection, pointer_fraction: f64) {
        let pointer_fraction = if pointer_fraction.is_finite() {
            pointer_fraction.clamp(0.0, 1.0)
        } else {
            0.5
        };
        let factor = match direction {
            ZoomDirection::In => self.behavior.zoom_step_factor,
            ZoomDirection::Out => 1.0 / self.behavior.zoom_step_factor,
        };

        let width = self.window.width();
        let new_width = (width / factor).clamp(self.behavior.min_width_percent, FULL_END);
        let pointer_abs = self.window.start + pointer_fraction * width;
        let new_start =
            (pointer_abs - pointer_fraction * new_width).clamp(FULL_START, FULL_END - new_width);
        self.window = ViewportWindow {
            start: new_start,
            end: (new_start + new_width).min(FULL_END),
        };
        trace!(
            ?direction,
            pointer_fraction,
            start = self.window.start,
            end = self.window.end,
            "viewport zoom"
        );
    }

    /// Returns `false` when the delta carries no direction.
    pub fn wheel_zoom(&mut self, delta_y: f64, pointer_fraction: f64) -> bool {
        match ZoomDirection::from_wheel_delta(delta_y) {
            Some(direction) => {
                self.zoom(direction, pointer_fraction);
                true
            }
            None => false,
        }
    }

    pub fn begin_brush(&mut self, index: usize) {
        self.drag = BrushDrag::Dragging {
            anchor_index: index,
            current_index: index,
        };
    }

    pub fn update_brush(&mut self, index: usize) {
        if let BrushDrag::Dragging { anchor_index, .. } = self.drag {
            self.drag = BrushDrag::Dragging {
                anchor_index,
                current_index: index,
            };
        }
    }

    /// Commits an in-progress drag. Returns `false` when no drag was active.
    pub fn finish_brush(&mut self, series_len: usize) -> bool {
        match self.drag {
            BrushDrag::Dragging {
                anchor_index,
                current_index,
            } => {
                self.set_brush(anchor_index, current_index, series_len);
                true
            }
            BrushDrag::Idle => false,
        }
    }

    /// Replaces the window with the inclusive series span `[start_index, end_index]`.
    ///
    /// Equal indices are a click rather than a drag and restore the full range.
    pub fn set_brush(&mut self, start_index: usize, end_index: usize, series_len: usize) {
        self.drag = BrushDrag::Idle;
        if start_index == end_index || series_len == 0 {
            self.window = ViewportWindow::FULL;
            trace!("brush cleared viewport override");
            return;
        }

        let last = series_len - 1;
        let low = start_index.min(end_index).min(last);
        let high = start_index.max(end_index).min(last);
        let len = series_len as f64;
        let start = low as f64 * FULL_END / len;
        let end = (high + 1) as f64 * FULL_END / len;
        self.window = widen_to_min(start, end, self.behavior.min_width_percent);
        trace!(
            low,
            high,
            start = self.window.start,
            end = self.window.end,
            "viewport brush"
        );
    }

    /// Shifts the window by `delta_percent`, keeping its width.
    pub fn pan_by(&mut self, delta_percent: f64) {
        if !delta_percent.is_finite() {
            return;
        }
        let width = self.window.width();
        let start = (self.window.start + delta_percent).clamp(FULL_START, FULL_END - width);
        self.window = ViewportWindow {
            start,
            end: (start + width).min(FULL_END),
        };
    }

    pub fn reset(&mut self) {
        self.window = ViewportWindow::FULL;
        self.drag = BrushDrag::Idle;
    }

    /// Half-open index range of the series covered by the window.
    #[must_use]
    pub fn visible_range(self, series_len: usize) -> Range<usize> {
        let len = series_len as f64;
        let first = (len * self.window.start / FULL_END).floor().max(0.0) as usize;
        let last = ((len * self.window.end / FULL_END).ceil().max(0.0) as usize).min(series_len);
        first.min(last)..last
    }

    /// Pure form of the transitions, for callers that keep snapshots.
    #[must_use]
    pub fn apply(mut self, event: ViewportEvent) -> Self {
        match event {
            ViewportEvent::Zoom {
                direction,
                pointer_fraction,
            } => self.zoom(direction, pointer_fraction),
            ViewportEvent::Wheel {
                delta_y,
                pointer_fraction,
            } => {
                self.wheel_zoom(delta_y, pointer_fraction);
            }
            ViewportEvent::BeginBrush { index } => self.begin_brush(index),
            ViewportEvent::UpdateBrush { index } => self.update_brush(index),
            ViewportEvent::SetBrush {
                start_index,
                end_index,
                series_len,
            } => self.set_brush(start_index, end_index, series_len),
            ViewportEvent::Pan { delta_percent } => self.pan_by(delta_percent),
            ViewportEvent::Reset => self.reset(),
        }
        self
    }
}

fn widen_to_min(start: f64, end: f64, min_width: f64) -> ViewportWindow {
    if end - start >= min_width {
        return ViewportWindow { start, end };
    }
    let center = (start + end) / 2.0;
    let start = (center - min_width / 2.0).clamp(FULL_START, FULL_END - min_width);
    ViewportWindow {
        start,
        end: (start + min_width).min(FULL_END),
    }
}
