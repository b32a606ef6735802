//! Editing session.
//!
//! [`Editor`] owns the placement, the page settings, the derived view state
//! and the active drag, and routes control-surface events to them. Every
//! handler runs synchronously and leaves the session consistent; there is no
//! background work.

use thiserror::Error;

use crate::compose::{
    compose_print_layout, preview_wrapper_transform, render_page_markup, render_print_document,
    PrintDocument, PrintLayout, Surface,
};
use crate::page::{Orientation, PageConfig};
use crate::placement::{PlacementState, QuarterTurn};
use crate::source::ImageSource;
use crate::view::{page_size_px, resolve_screen_scale, DragSession, ViewState, ViewportLayout};

/// Title of the print document.
pub const PRINT_TITLE: &str = "Print - PrecisionPrint A4";

/// Reasons a print request is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrintError {
    /// Nothing has been loaded yet.
    #[error("No image selected. Upload an image or paste a URL before printing.")]
    NoImage,

    /// The print surface could not be opened (usually a blocked popup).
    #[error("Please allow popups for this site to print.")]
    SurfaceUnavailable,
}

/// The on-screen rendition: same page markup as print, wrapped in a screen scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    pub layout: PrintLayout,
    pub screen_scale: f64,
    /// CSS transform for the page wrapper.
    pub wrapper_transform: String,
    /// On-screen page size in CSS pixels.
    pub page_px: (f64, f64),
    pub markup: String,
}

/// One editing session.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    placement: PlacementState,
    page: PageConfig,
    view: ViewState,
    layout: ViewportLayout,
    drag: DragSession,
}

impl Editor {
    /// New session with default placement, portrait page and default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// New session with custom viewport layout constants.
    pub fn with_layout(layout: ViewportLayout) -> Self {
        Self {
            layout: layout.sanitized(),
            ..Self::default()
        }
    }

    pub fn placement(&self) -> &PlacementState {
        &self.placement
    }

    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn layout(&self) -> &ViewportLayout {
        &self.layout
    }

    pub fn screen_scale(&self) -> f64 {
        self.view.screen_scale
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    // ------------------------------------------------------------------
    // Image and placement controls
    // ------------------------------------------------------------------

    /// Install a successfully loaded image.
    ///
    /// Failed loads never reach this point, so the placement is only ever
    /// reset by a load that succeeded.
    pub fn load_image(&mut self, source: ImageSource) {
        log::debug!(
            "Loaded {:?} image ({} bytes of URI), rotation kept at {}°",
            source.kind,
            source.uri.len(),
            self.placement.rotation_degrees()
        );
        // A drag on the previous image must not continue on the new one.
        self.drag.end();
        self.placement.load_image(source);
    }

    /// Record the natural size reported by the renderer.
    pub fn set_natural_size(&mut self, width: u32, height: u32) {
        self.placement.set_natural_size(width, height);
    }

    pub fn reset(&mut self) {
        self.placement.reset();
    }

    pub fn rotate(&mut self) -> QuarterTurn {
        self.placement.rotate_clockwise()
    }

    pub fn set_rotation_degrees(&mut self, degrees: i32) -> QuarterTurn {
        self.placement.set_rotation_degrees(degrees)
    }

    pub fn set_scale(&mut self, scale: f64) -> f64 {
        self.placement.set_scale(scale)
    }

    // ------------------------------------------------------------------
    // Page and view
    // ------------------------------------------------------------------

    /// Switch orientation. Placement is untouched; the screen scale is refit.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.page.orientation == orientation {
            return;
        }
        log::debug!("Orientation changed to {}", orientation.as_str());
        self.page.orientation = orientation;
        self.refit();
    }

    pub fn set_show_grid(&mut self, show_grid: bool) {
        self.page.show_grid = show_grid;
    }

    /// Record a new viewport size and refit the preview. Returns the new screen scale.
    pub fn resize_viewport(&mut self, width_px: f64, height_px: f64) -> f64 {
        self.view.viewport_px = Some((width_px, height_px));
        self.refit();
        self.view.screen_scale
    }

    fn refit(&mut self) {
        if let Some(viewport) = self.view.viewport_px {
            self.view.screen_scale =
                resolve_screen_scale(viewport, self.page.dimensions_mm(), &self.layout);
        }
    }

    // ------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------

    /// Pointer pressed over the image. Returns whether a drag started.
    ///
    /// Without an image there is nothing to grab, so no drag starts.
    pub fn pointer_down(&mut self, x_px: f64, y_px: f64) -> bool {
        if !self.placement.has_image() {
            return false;
        }
        self.drag.begin(x_px, y_px);
        log::debug!("Drag started at ({x_px}, {y_px})");
        true
    }

    /// Pointer moved. Returns whether the placement changed.
    pub fn pointer_move(&mut self, x_px: f64, y_px: f64) -> bool {
        match self
            .drag
            .move_to(x_px, y_px, self.view.screen_scale, self.layout.px_per_mm)
        {
            Some((dx_mm, dy_mm)) => {
                self.placement.translate_mm(dx_mm, dy_mm);
                true
            }
            None => false,
        }
    }

    /// Pointer released or capture lost. Returns whether a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        let ended = self.drag.end();
        if ended {
            let (x, y) = self.placement.offset_mm();
            log::debug!("Drag ended at offset ({x:.1}mm, {y:.1}mm)");
        }
        ended
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Physical layout, independent of the screen scale.
    pub fn print_layout(&self) -> PrintLayout {
        compose_print_layout(&self.placement, &self.page)
    }

    /// On-screen layout.
    pub fn preview(&self) -> PreviewLayout {
        let layout = self.print_layout();
        let markup = render_page_markup(
            &layout,
            Surface::Preview {
                show_grid: self.page.show_grid,
            },
        );
        PreviewLayout {
            page_px: page_size_px(
                (layout.page_width_mm, layout.page_height_mm),
                self.layout.px_per_mm,
                self.view.screen_scale,
            ),
            wrapper_transform: preview_wrapper_transform(self.view.screen_scale),
            screen_scale: self.view.screen_scale,
            markup,
            layout,
        }
    }

    /// Build the print document, refusing when there is nothing to print.
    ///
    /// An image lying entirely off the page still prints (as a blank page)
    /// but is logged.
    pub fn prepare_print(&self) -> Result<PrintDocument, PrintError> {
        let layout = self.print_layout();
        if layout.image.is_none() {
            log::warn!("Print requested with no image selected");
            return Err(PrintError::NoImage);
        }
        if layout.visible_fraction() == Some(0.0) {
            log::warn!("Printing an image that lies entirely outside the page");
        }
        Ok(render_print_document(&layout, PRINT_TITLE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::ReadySignal;
    use crate::view::PX_PER_MM;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn editor_with_image() -> Editor {
        let mut editor = Editor::new();
        editor.load_image(ImageSource::from_url("https://picsum.photos/800/600").unwrap());
        editor
    }

    #[test]
    fn test_session_start() {
        let editor = Editor::new();
        assert_eq!(editor.placement().scale, 0.5);
        assert_eq!(editor.page().orientation, Orientation::Portrait);
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_load_then_drag_at_full_scale() {
        let mut editor = editor_with_image();
        assert_eq!(editor.placement().scale, 1.0);
        assert_eq!(editor.placement().offset_mm(), (0.0, 0.0));

        editor.view.screen_scale = 1.0;
        assert!(editor.pointer_down(100.0, 100.0));
        assert!(editor.pointer_move(137.8, 100.0));
        assert!(editor.pointer_up());

        let (x, y) = editor.placement().offset_mm();
        assert!(approx(x, 10.0));
        assert!(approx(y, 0.0));
    }

    #[test]
    fn test_drag_at_half_scale() {
        let mut editor = editor_with_image();
        editor.view.screen_scale = 0.5;
        editor.pointer_down(0.0, 0.0);
        editor.pointer_move(37.8, 0.0);
        editor.pointer_up();
        assert!(approx(editor.placement().offset_x_mm, 20.0));
    }

    #[test]
    fn test_moves_after_pointer_up_ignored() {
        let mut editor = editor_with_image();
        editor.pointer_down(0.0, 0.0);
        editor.pointer_up();
        assert!(!editor.pointer_move(500.0, 500.0));
        assert_eq!(editor.placement().offset_mm(), (0.0, 0.0));
    }

    #[test]
    fn test_no_drag_without_image() {
        let mut editor = Editor::new();
        assert!(!editor.pointer_down(0.0, 0.0));
        assert!(!editor.pointer_move(10.0, 10.0));
        assert!(!editor.pointer_up());
    }

    #[test]
    fn test_load_ends_active_drag() {
        let mut editor = editor_with_image();
        editor.pointer_down(0.0, 0.0);
        editor.load_image(ImageSource::from_url("b.png").unwrap());
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_rotation_persists_across_loads() {
        let mut editor = editor_with_image();
        editor.rotate();
        editor.load_image(ImageSource::from_url("b.png").unwrap());
        assert_eq!(editor.placement().rotation_degrees(), 90);
        assert_eq!(editor.placement().scale, 1.0);
        assert_eq!(editor.placement().offset_mm(), (0.0, 0.0));
    }

    #[test]
    fn test_orientation_change_keeps_placement() {
        let mut editor = editor_with_image();
        editor.set_scale(2.0);
        editor.rotate();
        editor.pointer_down(0.0, 0.0);
        editor.pointer_move(20.0, -10.0);
        editor.pointer_up();
        let before = editor.placement().clone();

        editor.set_orientation(Orientation::Landscape);
        assert_eq!(editor.placement(), &before);
        editor.set_orientation(Orientation::Portrait);
        assert_eq!(editor.placement(), &before);
    }

    #[test]
    fn test_orientation_change_refits() {
        let mut editor = Editor::new();
        let portrait = editor.resize_viewport(1600.0, 1000.0);
        editor.set_orientation(Orientation::Landscape);
        assert!(editor.screen_scale() > portrait);
    }

    #[test]
    fn test_orientation_without_viewport_keeps_scale() {
        let mut editor = Editor::new();
        editor.set_orientation(Orientation::Landscape);
        assert_eq!(editor.screen_scale(), 0.5);
    }

    #[test]
    fn test_screen_scale_never_reaches_placement() {
        let mut editor = editor_with_image();
        let before = editor.placement().clone();
        editor.resize_viewport(800.0, 600.0);
        editor.resize_viewport(3000.0, 2000.0);
        assert_eq!(editor.placement(), &before);
    }

    #[test]
    fn test_print_layout_ignores_screen_scale() {
        let mut editor = editor_with_image();
        editor.resize_viewport(800.0, 600.0);
        let small = editor.print_layout();
        editor.resize_viewport(4000.0, 4000.0);
        let large = editor.print_layout();
        assert_eq!(small, large);
    }

    #[test]
    fn test_preview_uses_screen_scale() {
        let mut editor = editor_with_image();
        let scale = editor.resize_viewport(4000.0, 4000.0);
        let preview = editor.preview();
        assert!(approx(scale, 0.85));
        assert_eq!(preview.wrapper_transform, "scale(0.85)");
        assert!(approx(preview.page_px.0, 210.0 * PX_PER_MM * 0.85));
        assert!(preview.markup.contains("grid-overlay"));
    }

    #[test]
    fn test_grid_toggle_is_presentation_only() {
        let mut editor = editor_with_image();
        let layout = editor.print_layout();
        editor.set_show_grid(false);
        assert_eq!(editor.print_layout(), layout);
        assert!(!editor.preview().markup.contains("grid-overlay"));
    }

    #[test]
    fn test_prepare_print_requires_image() {
        let editor = Editor::new();
        assert_eq!(editor.prepare_print(), Err(PrintError::NoImage));
    }

    #[test]
    fn test_prepare_print() {
        let editor = editor_with_image();
        let doc = editor.prepare_print().unwrap();
        assert_eq!(doc.ready, ReadySignal::ImageDecoded);
        assert!(doc.html.contains(PRINT_TITLE));
        assert!(doc.html.contains("size: 210mm 297mm"));
    }

    #[test]
    fn test_prepare_print_off_page_still_prints() {
        let mut editor = editor_with_image();
        editor.set_natural_size(10, 10);
        editor.placement.translate_mm(-1000.0, 0.0);
        assert!(editor.prepare_print().is_ok());
    }

    #[test]
    fn test_with_layout_sanitizes() {
        let editor = Editor::with_layout(ViewportLayout {
            px_per_mm: 0.0,
            ..ViewportLayout::default()
        });
        assert_eq!(editor.layout().px_per_mm, PX_PER_MM);
    }

    #[test]
    fn test_print_error_messages() {
        assert_eq!(
            PrintError::SurfaceUnavailable.to_string(),
            "Please allow popups for this site to print."
        );
    }
}
