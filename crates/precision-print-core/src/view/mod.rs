//! On-screen view model.
//!
//! The preview shows the page at true mm size wrapped in a uniform CSS
//! `scale(screen_scale)`. The screen scale is a display concern only: it is
//! divided out of pointer input before anything reaches the placement, and
//! it never appears in print output.
//!
//! # Coordinate Systems
//!
//! - Screen pixels: pointer `clientX/clientY`, y down
//! - mm-space: page-centered millimeters, y down
//! - One mm is `PX_PER_MM` CSS pixels at screen scale 1.0

mod drag;
mod screen_scale;

pub use drag::{drag_delta_mm, DragSession};
pub use screen_scale::{resolve_screen_scale, ViewportLayout};

use serde::{Deserialize, Serialize};

/// CSS pixels per millimeter at 96 DPI, rounded.
pub const PX_PER_MM: f64 = 3.78;

/// Screen scale used before the first viewport measurement.
pub const INITIAL_SCREEN_SCALE: f64 = 0.5;

/// Derived view state. Recomputed on resize and orientation change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub screen_scale: f64,
    /// Last measured viewport as `(width_px, height_px)`.
    pub viewport_px: Option<(f64, f64)>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            screen_scale: INITIAL_SCREEN_SCALE,
            viewport_px: None,
        }
    }
}

/// Page size in CSS pixels after the preview scale is applied.
pub fn page_size_px(page_mm: (f64, f64), px_per_mm: f64, screen_scale: f64) -> (f64, f64) {
    (
        page_mm.0 * px_per_mm * screen_scale,
        page_mm.1 * px_per_mm * screen_scale,
    )
}
