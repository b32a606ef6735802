//! Placement geometry in page millimeters.
//!
//! The image's own center is its local origin. A point in image-local mm is
//! mapped onto the page by
//!
//! ```text
//! page = translate(page_center + offset) * rotate(rotation) * scale(scale) * local
//! ```
//!
//! so rotation and scaling both pivot around the placed center, never the
//! page origin. The origin of page space is the top-left corner.

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::page::{Orientation, PageConfig};
use crate::placement::{PlacementState, QuarterTurn};
use crate::source::{ImageSize, ImageSource};

/// The image as placed on a physical page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    pub source: ImageSource,
    /// Offset from the page center in mm.
    pub offset_mm: Vec2,
    /// Image center in mm from the page's top-left corner.
    pub center_mm: Point,
    pub rotation: QuarterTurn,
    pub scale: f64,
}

impl ImagePlacement {
    /// Image-local to page-mm transform (translate, then rotate, then scale).
    pub fn affine(&self) -> Affine {
        Affine::translate(self.center_mm.to_vec2())
            * Affine::rotate(self.rotation.radians())
            * Affine::scale(self.scale)
    }

    /// Natural size interpreted as mm, when known.
    pub fn natural_size_mm(&self) -> Option<Size> {
        self.source.natural_size.map(|size: ImageSize| {
            let (w, h) = size.as_mm();
            Size::new(w, h)
        })
    }

    /// Axis-aligned bounds of the placed image on the page.
    ///
    /// `None` until the natural size is known.
    pub fn bounds_mm(&self) -> Option<Rect> {
        let size = self.natural_size_mm()?;
        let local = Rect::from_center_size(Point::ORIGIN, size);
        Some(self.affine().transform_rect_bbox(local))
    }
}

/// Everything needed to render one page at 1:1 physical size.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintLayout {
    pub orientation: Orientation,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    /// `None` when no image is selected; the page renders empty.
    pub image: Option<ImagePlacement>,
}

impl PrintLayout {
    /// The page rectangle in mm, origin at the top-left corner.
    pub fn page_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_width_mm, self.page_height_mm)
    }

    /// Fraction of the placed image's bounding box that lies on the page.
    ///
    /// `None` when there is no image or its size is unknown. Only the
    /// overlapping part is printed; an image dragged fully off the page
    /// reports `0.0`.
    pub fn visible_fraction(&self) -> Option<f64> {
        let bounds = self.image.as_ref()?.bounds_mm()?;
        let area = bounds.area();
        if area <= 0.0 {
            return Some(0.0);
        }
        let overlap = bounds.intersect(self.page_rect());
        Some((overlap.area() / area).clamp(0.0, 1.0))
    }
}

/// Compose the print-time layout from the placement and page settings.
///
/// The screen scale is not an input: print geometry is always 1 mm to 1 mm.
pub fn compose_print_layout(placement: &PlacementState, page: &PageConfig) -> PrintLayout {
    let (page_width_mm, page_height_mm) = page.dimensions_mm();
    let (cx, cy) = page.center_mm();

    let image = placement.image.as_ref().map(|source| {
        let offset_mm = Vec2::new(placement.offset_x_mm, placement.offset_y_mm);
        ImagePlacement {
            source: source.clone(),
            offset_mm,
            center_mm: Point::new(cx, cy) + offset_mm,
            rotation: placement.rotation,
            scale: placement.scale,
        }
    });

    PrintLayout {
        orientation: page.orientation,
        page_width_mm,
        page_height_mm,
        image,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn orientation() -> impl Strategy<Value = Orientation> {
        prop_oneof![Just(Orientation::Portrait), Just(Orientation::Landscape)]
    }

    proptest! {
        #[test]
        fn prop_image_center_is_page_center_plus_offset(
            dx in -500.0f64..500.0,
            dy in -500.0f64..500.0,
            degrees in 0i32..360,
            scale in 0.1f64..3.0,
            orientation in orientation(),
        ) {
            let mut state = PlacementState::new();
            state.load_image(ImageSource::from_url("image.png").unwrap());
            state.translate_mm(dx, dy);
            state.set_rotation_degrees(degrees);
            state.set_scale(scale);
            let page = PageConfig { orientation, show_grid: true };

            let image = compose_print_layout(&state, &page).image.unwrap();
            let (cx, cy) = page.center_mm();
            prop_assert!((image.center_mm.x - (cx + dx)).abs() < 1e-9);
            prop_assert!((image.center_mm.y - (cy + dy)).abs() < 1e-9);

            // Rotation and scale pivot on the placed center.
            let origin = image.affine() * Point::ORIGIN;
            prop_assert!((origin - image.center_mm).hypot() < 1e-9);
        }
    }
}
