//! Session state driven by operator input: region filter and visible window.

pub mod region_selection;
pub mod viewport;

pub use region_selection::{RegionSelection, SelectionEvent, SelectionMember, SelectionMode};
pub use viewport::{
    BrushDrag, ViewportBehavior, ViewportController, ViewportEvent, ViewportWindow, ZoomDirection,
};
