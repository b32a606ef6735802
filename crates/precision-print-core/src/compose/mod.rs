//! Print-time geometry composition.
//!
//! Turns the placement and page settings into a 1:1 physical layout and
//! renders it for the preview or for a print surface.
//!
//! # Transform Order
//!
//! The image transform is always composed as:
//! 1. Translate the image center to `page_center + offset`
//! 2. Rotate by the quarter turn
//! 3. Scale by the placement scale
//!
//! The preview applies its screen scale to the whole page wrapper, outside
//! this transform, so preview zoom and print geometry never interact.

mod css;
mod document;
mod geometry;

pub use css::{
    format_number, image_style, image_transform, page_style, preview_wrapper_transform, GRID_CSS,
};
pub use document::{
    render_page_markup, render_print_document, PrintDocument, ReadySignal, Surface,
    PAGE_ELEMENT_ID, PLACEHOLDER_HINT, PLACEHOLDER_TITLE,
};
pub use geometry::{compose_print_layout, ImagePlacement, PrintLayout};
