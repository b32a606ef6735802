//! CSS renditions of the placement.
//!
//! The image element is anchored at the page center (`left: 50%; top: 50%`)
//! and carries one transform: shift its own center onto the anchor, add the
//! mm offset, then rotate and scale about that point. The preview wraps the
//! page in a separate `scale()` so the image transform is identical on
//! screen and on paper.

use super::geometry::ImagePlacement;

/// Format a length without trailing noise, e.g. `12.5` or `-3`.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // Avoid printing "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Transform for the image element, in physical units.
///
/// ```text
/// translate(calc(-50% + 5mm), calc(-50% + -3mm)) rotate(180deg) scale(2)
/// ```
pub fn image_transform(placement: &ImagePlacement) -> String {
    format!(
        "translate(calc(-50% + {}mm), calc(-50% + {}mm)) rotate({}deg) scale({})",
        format_number(placement.offset_mm.x),
        format_number(placement.offset_mm.y),
        placement.rotation.degrees(),
        format_number(placement.scale),
    )
}

/// Inline style for the image element.
///
/// When the natural size is known the element is sized in mm so one natural
/// pixel prints as one millimeter at scale 1.
pub fn image_style(placement: &ImagePlacement) -> String {
    let mut style = format!(
        "position:absolute;left:50%;top:50%;transform-origin:center;transform:{};",
        image_transform(placement)
    );
    if let Some(size) = placement.natural_size_mm() {
        style.push_str(&format!(
            "width:{}mm;height:{}mm;",
            format_number(size.width),
            format_number(size.height)
        ));
    }
    style.push_str("max-width:none;display:block;user-select:none;");
    style
}

/// Inline style for the page container at 1:1 physical size.
pub fn page_style(width_mm: f64, height_mm: f64) -> String {
    format!(
        "position:relative;width:{}mm;height:{}mm;overflow:hidden;background:#fff;",
        format_number(width_mm),
        format_number(height_mm)
    )
}

/// Transform for the preview wrapper around the page.
pub fn preview_wrapper_transform(screen_scale: f64) -> String {
    format!("scale({})", format_number(screen_scale))
}

/// Alignment grid layers: 10mm minor lines, 50mm major lines.
pub const GRID_CSS: &str = "\
.bg-grid-pattern{background-size:10mm 10mm;background-image:\
linear-gradient(to right,rgba(0,0,0,0.05) 1px,transparent 1px),\
linear-gradient(to bottom,rgba(0,0,0,0.05) 1px,transparent 1px);}\
.bg-grid-pattern-strong{background-size:50mm 50mm;background-image:\
linear-gradient(to right,rgba(0,0,0,0.1) 1px,transparent 1px),\
linear-gradient(to bottom,rgba(0,0,0,0.1) 1px,transparent 1px);}";
