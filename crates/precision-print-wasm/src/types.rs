//! JavaScript-facing views of the editor state.
//!
//! These are plain serde structs converted with `serde-wasm-bindgen`, so the
//! host page receives ordinary objects it can bind to controls.

use precision_print_core::placement::format_scale_percent;
use precision_print_core::{Editor, Orientation, PlacementState};
use serde::Serialize;

/// Everything the control surface displays.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSnapshot {
    pub placement: PlacementState,
    pub orientation: Orientation,
    pub show_grid: bool,
    pub screen_scale: f64,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub dragging: bool,
    /// `"X: 5.0mm"`
    pub position_x_label: String,
    /// `"Y: -3.0mm"`
    pub position_y_label: String,
    /// `"100%"`
    pub scale_label: String,
    /// `"Rotate 90° (180°)"`
    pub rotate_label: String,
}

impl EditorSnapshot {
    pub fn from_editor(editor: &Editor) -> Self {
        let placement = editor.placement();
        let (page_width_mm, page_height_mm) = editor.page().dimensions_mm();
        let (position_x_label, position_y_label) = placement.position_readout();
        Self {
            scale_label: format_scale_percent(placement.scale),
            rotate_label: format!("Rotate 90° ({}°)", placement.rotation_degrees()),
            placement: placement.clone(),
            orientation: editor.page().orientation,
            show_grid: editor.page().show_grid,
            screen_scale: editor.screen_scale(),
            page_width_mm,
            page_height_mm,
            dragging: editor.is_dragging(),
            position_x_label,
            position_y_label,
        }
    }
}

/// Preview rendering inputs for the host page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewSnapshot {
    pub screen_scale: f64,
    pub wrapper_transform: String,
    pub page_width_px: f64,
    pub page_height_px: f64,
    /// Image element transform, absent when no image is selected.
    pub image_transform: Option<String>,
    pub markup: String,
}

impl PreviewSnapshot {
    pub fn from_editor(editor: &Editor) -> Self {
        let preview = editor.preview();
        Self {
            image_transform: preview
                .layout
                .image
                .as_ref()
                .map(precision_print_core::compose::image_transform),
            screen_scale: preview.screen_scale,
            wrapper_transform: preview.wrapper_transform,
            page_width_px: preview.page_px.0,
            page_height_px: preview.page_px.1,
            markup: preview.markup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use precision_print_core::ImageSource;

    #[test]
    fn test_snapshot_labels() {
        let mut editor = Editor::new();
        editor.load_image(ImageSource::from_url("a.png").unwrap());
        editor.rotate();
        editor.rotate();
        editor.set_scale(1.5);

        let snapshot = EditorSnapshot::from_editor(&editor);
        assert_eq!(snapshot.scale_label, "150%");
        assert_eq!(snapshot.rotate_label, "Rotate 90° (180°)");
        assert_eq!(snapshot.position_x_label, "X: 0.0mm");
        assert_eq!((snapshot.page_width_mm, snapshot.page_height_mm), (210.0, 297.0));
        assert!(!snapshot.dragging);
    }

    #[test]
    fn test_preview_snapshot_without_image() {
        let editor = Editor::new();
        let preview = PreviewSnapshot::from_editor(&editor);
        assert!(preview.image_transform.is_none());
        assert_eq!(preview.wrapper_transform, "scale(0.5)");
    }

    #[test]
    fn test_preview_snapshot_with_image() {
        let mut editor = Editor::new();
        editor.load_image(ImageSource::from_url("a.png").unwrap());
        let preview = PreviewSnapshot::from_editor(&editor);
        assert_eq!(
            preview.image_transform.as_deref(),
            Some("translate(calc(-50% + 0mm), calc(-50% + 0mm)) rotate(0deg) scale(1)")
        );
    }
}
