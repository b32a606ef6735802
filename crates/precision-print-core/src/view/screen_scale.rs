//! Fit-to-viewport preview scale.
//!
//! # Algorithm
//!
//! ```text
//! available_w = viewport_w - sidebar
//! available_h = viewport_h - margin
//! fit         = min(available_h / page_h_px, available_w / page_w_px)
//! scale       = min(fit, max_scale) * shrink
//! ```
//!
//! Page pixel sizes are taken at scale 1 (`mm * px_per_mm`). The shrink factor
//! keeps a visible margin around the page.

use serde::{Deserialize, Serialize};

use super::PX_PER_MM;

/// Width reserved for the control sidebar, in CSS pixels.
pub const SIDEBAR_WIDTH_PX: f64 = 350.0;

/// Combined top and bottom margin, in CSS pixels.
pub const VERTICAL_MARGIN_PX: f64 = 80.0;

/// Fraction of the fitted size actually used.
pub const SHRINK_FACTOR: f64 = 0.85;

/// The preview never zooms past true size.
pub const MAX_SCREEN_SCALE: f64 = 1.0;

/// Smallest available extent used when the viewport is smaller than the reserved space.
const MIN_AVAILABLE_PX: f64 = 1.0;

/// Layout constants for fitting the page into the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportLayout {
    pub sidebar_width_px: f64,
    pub vertical_margin_px: f64,
    pub shrink_factor: f64,
    pub max_screen_scale: f64,
    pub px_per_mm: f64,
}

impl Default for ViewportLayout {
    fn default() -> Self {
        Self {
            sidebar_width_px: SIDEBAR_WIDTH_PX,
            vertical_margin_px: VERTICAL_MARGIN_PX,
            shrink_factor: SHRINK_FACTOR,
            max_screen_scale: MAX_SCREEN_SCALE,
            px_per_mm: PX_PER_MM,
        }
    }
}

impl ViewportLayout {
    /// Replace unusable values (non-finite or non-positive) with the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        let non_negative = |value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            sidebar_width_px: non_negative(self.sidebar_width_px, defaults.sidebar_width_px),
            vertical_margin_px: non_negative(self.vertical_margin_px, defaults.vertical_margin_px),
            shrink_factor: positive(self.shrink_factor, defaults.shrink_factor),
            max_screen_scale: positive(self.max_screen_scale, defaults.max_screen_scale),
            px_per_mm: positive(self.px_per_mm, defaults.px_per_mm),
        }
    }
}

/// Compute the preview scale that fits the page into the viewport.
///
/// # Arguments
///
/// * `viewport_px` - Window inner size as `(width, height)` in CSS pixels
/// * `page_mm` - Page size as `(width, height)` in millimeters
/// * `layout` - Reserved space and scaling constants
///
/// # Returns
///
/// A positive, finite scale. Viewports smaller than the reserved space are
/// treated as having one pixel available rather than producing a negative
/// or zero scale.
pub fn resolve_screen_scale(
    viewport_px: (f64, f64),
    page_mm: (f64, f64),
    layout: &ViewportLayout,
) -> f64 {
    let layout = layout.sanitized();

    let available_w = available(viewport_px.0 - layout.sidebar_width_px);
    let available_h = available(viewport_px.1 - layout.vertical_margin_px);

    let page_w_px = page_mm.0 * layout.px_per_mm;
    let page_h_px = page_mm.1 * layout.px_per_mm;

    let fit_h = available_h / page_h_px;
    let fit_w = available_w / page_w_px;

    fit_h.min(fit_w).min(layout.max_screen_scale) * layout.shrink_factor
}

#[inline]
fn available(extent: f64) -> f64 {
    if extent.is_finite() {
        extent.max(MIN_AVAILABLE_PX)
    } else {
        MIN_AVAILABLE_PX
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any positive viewport yields a positive, finite scale no larger than the cap.
        #[test]
        fn prop_scale_positive_and_capped(
            w in 1.0f64..20_000.0,
            h in 1.0f64..20_000.0,
            landscape in any::<bool>(),
        ) {
            let page = if landscape { (297.0, 210.0) } else { (210.0, 297.0) };
            let scale = resolve_screen_scale((w, h), page, &ViewportLayout::default());
            prop_assert!(scale > 0.0);
            prop_assert!(scale.is_finite());
            prop_assert!(scale <= MAX_SCREEN_SCALE * SHRINK_FACTOR + 1e-12);
        }

        /// The scaled page never overflows the available area.
        #[test]
        fn prop_page_fits_available_area(
            w in 400.0f64..20_000.0,
            h in 100.0f64..20_000.0,
        ) {
            let layout = ViewportLayout::default();
            let scale = resolve_screen_scale((w, h), (210.0, 297.0), &layout);
            prop_assert!(210.0 * PX_PER_MM * scale <= w - layout.sidebar_width_px + 1e-9);
            prop_assert!(297.0 * PX_PER_MM * scale <= h - layout.vertical_margin_px + 1e-9);
        }
    }
}
