//! Pointer drag translation.
//!
//! A drag is sampled as a series of small steps. Each pointer move produces
//! the pixel delta since the previous sample, converted to mm by dividing out
//! both the pixel density and the preview scale, and then the sample point is
//! rebased. The stored offset therefore tracks the pointer in page space no
//! matter how far the preview is zoomed out.

/// Convert a screen pixel delta into a mm-space delta.
///
/// `dx_mm = dx_px / px_per_mm / screen_scale`, and likewise for y.
///
/// # Example
///
/// ```
/// use precision_print_core::view::{drag_delta_mm, PX_PER_MM};
///
/// let (dx, _) = drag_delta_mm((37.8, 0.0), 1.0, PX_PER_MM);
/// assert!((dx - 10.0).abs() < 1e-9);
/// ```
pub fn drag_delta_mm(delta_px: (f64, f64), screen_scale: f64, px_per_mm: f64) -> (f64, f64) {
    let divisor = px_per_mm * screen_scale;
    (delta_px.0 / divisor, delta_px.1 / divisor)
}

/// Tracks one pointer drag from pointer-down to pointer-up.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSession {
    /// Last sampled pointer position in screen pixels; `None` when idle.
    last_px: Option<(f64, f64)>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.last_px.is_some()
    }

    /// Start a drag at the pointer-down position.
    ///
    /// Starting while already active rebases to the new position.
    pub fn begin(&mut self, x_px: f64, y_px: f64) {
        self.last_px = Some((x_px, y_px));
    }

    /// Sample a pointer move.
    ///
    /// Returns the mm delta since the previous sample and rebases to the new
    /// position, or `None` when no drag is active.
    pub fn move_to(
        &mut self,
        x_px: f64,
        y_px: f64,
        screen_scale: f64,
        px_per_mm: f64,
    ) -> Option<(f64, f64)> {
        let (last_x, last_y) = self.last_px?;
        self.last_px = Some((x_px, y_px));
        Some(drag_delta_mm(
            (x_px - last_x, y_px - last_y),
            screen_scale,
            px_per_mm,
        ))
    }

    /// End the drag on pointer-up or lost capture. Returns whether one was active.
    pub fn end(&mut self) -> bool {
        self.last_px.take().is_some()
    }
}
