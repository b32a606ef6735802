//! Physical page geometry.
//!
//! The page is always an A4 sheet. Orientation decides which edge is the
//! width; nothing else about the page affects placement math.

use serde::{Deserialize, Serialize};

/// A4 short edge in millimeters.
pub const A4_WIDTH_MM: f64 = 210.0;

/// A4 long edge in millimeters.
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// 210mm wide, 297mm tall.
    #[default]
    Portrait,
    /// 297mm wide, 210mm tall.
    Landscape,
}

impl Orientation {
    /// The other orientation.
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Portrait => Orientation::Landscape,
            Orientation::Landscape => Orientation::Portrait,
        }
    }

    /// Lowercase name, as used in CSS `@page` rules and the control surface.
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }

    /// Parse the control-surface name. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "portrait" => Some(Orientation::Portrait),
            "landscape" => Some(Orientation::Landscape),
            _ => None,
        }
    }
}

/// Resolve the page size for an orientation as `(width_mm, height_mm)`.
///
/// # Example
///
/// ```
/// use precision_print_core::page::{page_dimensions_mm, Orientation};
///
/// assert_eq!(page_dimensions_mm(Orientation::Portrait), (210.0, 297.0));
/// assert_eq!(page_dimensions_mm(Orientation::Landscape), (297.0, 210.0));
/// ```
pub fn page_dimensions_mm(orientation: Orientation) -> (f64, f64) {
    match orientation {
        Orientation::Portrait => (A4_WIDTH_MM, A4_HEIGHT_MM),
        Orientation::Landscape => (A4_HEIGHT_MM, A4_WIDTH_MM),
    }
}

/// Page settings chosen on the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub orientation: Orientation,
    /// Presentation only. Never read by the placement or print geometry.
    pub show_grid: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            show_grid: true,
        }
    }
}

impl PageConfig {
    /// Page size in millimeters for the current orientation.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        page_dimensions_mm(self.orientation)
    }

    /// Page center in millimeters, measured from the top-left corner.
    pub fn center_mm(&self) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        (w / 2.0, h / 2.0)
    }
}
