//! PrecisionPrint Core - A4 image placement library
//!
//! This crate holds the state and geometry behind the PrecisionPrint editor:
//! positioning, scaling and rotating one image on a virtual A4 sheet and
//! producing a layout that prints at true physical size.
//!
//! Nothing here depends on a rendering framework. Every operation is a plain
//! function or a method on an explicit state struct, so the geometry can be
//! tested without a display.
//!
//! # Modules
//!
//! - `page` - Orientation and A4 page dimensions
//! - `placement` - Offset, scale, rotation and image of the placed image
//! - `view` - Screen scale fitting and pointer drag translation
//! - `compose` - Print-time layout, CSS transforms and the print document
//! - `source` - Image sources from URLs and uploaded bytes
//! - `generate` - Optional image generation service protocol
//! - `editor` - The editing session tying it all together

pub mod compose;
pub mod editor;
pub mod generate;
pub mod page;
pub mod placement;
pub mod source;
pub mod view;

pub use compose::{compose_print_layout, ImagePlacement, PrintDocument, PrintLayout};
pub use editor::{Editor, PreviewLayout, PrintError};
pub use generate::{GenerateError, GenerationConfig};
pub use page::{page_dimensions_mm, Orientation, PageConfig};
pub use placement::{PlacementState, QuarterTurn};
pub use source::{ImageSize, ImageSource, LoadError, SourceKind};
pub use view::{drag_delta_mm, resolve_screen_scale, DragSession, ViewState, ViewportLayout, PX_PER_MM};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_example_walkthrough() {
        // Portrait page, image loaded over the 0.5 default
        let mut editor = Editor::new();
        assert_eq!(editor.placement().scale, 0.5);
        editor.load_image(ImageSource::from_url("photo.jpg").unwrap());
        assert_eq!(editor.placement().scale, 1.0);
        assert_eq!(editor.placement().offset_mm(), (0.0, 0.0));

        // Offset (5, -3), half turn, 2x on a 210x297 page
        editor.set_rotation_degrees(180);
        editor.set_scale(2.0);
        let mut placement = editor.placement().clone();
        placement.translate_mm(5.0, -3.0);

        let layout = compose_print_layout(&placement, editor.page());
        let image = layout.image.unwrap();
        assert!((image.center_mm.x - 110.0).abs() < 1e-9);
        assert!((image.center_mm.y - 145.5).abs() < 1e-9);
        assert_eq!(image.rotation.degrees(), 180);
        assert_eq!(image.scale, 2.0);
    }
}
