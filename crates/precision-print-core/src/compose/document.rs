//! Page markup and the standalone print document.
//!
//! The print document declares its physical page size with an `@page` rule
//! so the output device does not apply fit-to-page scaling, contains the page
//! at exactly W×H mm with no screen scale, and only calls `window.print()`
//! once every image on it has finished decoding.

use super::css::{image_style, page_style, GRID_CSS};
use super::geometry::PrintLayout;

/// Where the markup is going to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// On-screen editor. Shows the grid (if enabled) and a placeholder when empty.
    Preview { show_grid: bool },
    /// Physical output. Never shows the grid or the placeholder.
    Print,
}

/// What the print surface must wait for before printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadySignal {
    /// Print once the placed image reports it has decoded.
    ImageDecoded,
    /// Nothing to wait for.
    Immediate,
}

/// A complete HTML document ready to be written to a print surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintDocument {
    pub html: String,
    pub ready: ReadySignal,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
}

/// Message shown in the preview when no image is selected.
pub const PLACEHOLDER_TITLE: &str = "No Image Selected";
pub const PLACEHOLDER_HINT: &str = "Upload an image or use AI to generate one.";

/// Element id of the page container.
pub const PAGE_ELEMENT_ID: &str = "print-container";

/// Render the page container and its contents.
pub fn render_page_markup(layout: &PrintLayout, surface: Surface) -> String {
    let mut html = format!(
        r#"<div id="{PAGE_ELEMENT_ID}" style="{}">"#,
        page_style(layout.page_width_mm, layout.page_height_mm)
    );

    if let Surface::Preview { show_grid: true } = surface {
        html.push_str(concat!(
            r#"<div class="grid-overlay" style="position:absolute;inset:0;pointer-events:none;z-index:10;">"#,
            r#"<div class="bg-grid-pattern" style="width:100%;height:100%;opacity:0.6;"></div>"#,
            r#"<div class="bg-grid-pattern-strong" style="position:absolute;inset:0;opacity:0.4;"></div>"#,
            r#"<div style="position:absolute;top:50%;left:0;width:100%;height:1px;background:#60a5fa;opacity:0.5;"></div>"#,
            r#"<div style="position:absolute;left:50%;top:0;height:100%;width:1px;background:#60a5fa;opacity:0.5;"></div>"#,
            "</div>",
        ));
    }

    match (&layout.image, surface) {
        (Some(image), _) => {
            html.push_str(&format!(
                r#"<img src="{}" alt="Printable" draggable="false" style="{}">"#,
                escape_attr(&image.source.uri),
                image_style(image)
            ));
        }
        (None, Surface::Preview { .. }) => {
            html.push_str(&format!(
                r#"<div class="placeholder" style="position:absolute;inset:0;display:flex;align-items:center;justify-content:center;color:#9ca3af;"><div style="text-align:center;"><p>{PLACEHOLDER_TITLE}</p><p>{PLACEHOLDER_HINT}</p></div></div>"#
            ));
        }
        (None, Surface::Print) => {}
    }

    html.push_str("</div>");
    html
}

/// Render a standalone document for the print surface.
pub fn render_print_document(layout: &PrintLayout, title: &str) -> PrintDocument {
    let ready = if layout.image.is_some() {
        ReadySignal::ImageDecoded
    } else {
        ReadySignal::Immediate
    };

    let width = super::css::format_number(layout.page_width_mm);
    let height = super::css::format_number(layout.page_height_mm);
    let page = render_page_markup(layout, Surface::Print);

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>
@page {{ size: {width}mm {height}mm; margin: 0; }}
html, body {{ margin: 0; padding: 0; }}
body {{ background: #f3f4f6; display: flex; justify-content: center; align-items: center; min-height: 100vh; }}
#{PAGE_ELEMENT_ID} {{ margin: 0 !important; box-shadow: none !important; overflow: hidden !important; }}
@media print {{
  body {{ background: #fff; display: block; min-height: 0; }}
  #{PAGE_ELEMENT_ID} {{ position: absolute; top: 0; left: 0; }}
}}
{GRID_CSS}
</style>
</head>
<body>
{page}
<script>
{READY_SCRIPT}
</script>
</body>
</html>
"#,
        title = escape_attr(title),
    );

    PrintDocument {
        html,
        ready,
        page_width_mm: layout.page_width_mm,
        page_height_mm: layout.page_height_mm,
    }
}

/// Prints once all images have decoded. Decode failures still print.
const READY_SCRIPT: &str = r#"window.addEventListener('load', function () {
  var images = Array.prototype.slice.call(document.images);
  Promise.all(images.map(function (img) {
    return img.decode ? img.decode().catch(function () {}) : Promise.resolve();
  })).then(function () {
    window.focus();
    window.print();
  });
});"#;

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
