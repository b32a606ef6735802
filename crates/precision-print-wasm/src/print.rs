//! Popup print surface.
//!
//! The composed document is written into a fresh window. The document itself
//! waits for its image to decode before calling `print()`, so there is no
//! timer racing a slow image load.

use precision_print_core::{PrintDocument, PrintError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, Window};

/// Features for the print popup.
const POPUP_FEATURES: &str = "width=1000,height=1000";

/// Open a popup and hand it the print document.
pub(crate) fn open_print_surface(doc: &PrintDocument) -> Result<(), PrintError> {
    let window = web_sys::window().ok_or(PrintError::SurfaceUnavailable)?;
    let popup = open_popup(&window).ok_or(PrintError::SurfaceUnavailable)?;

    write_document(&popup, &doc.html).map_err(|e| {
        log::warn!("Could not write print document: {e:?}");
        let _ = popup.close();
        PrintError::SurfaceUnavailable
    })?;

    log::debug!(
        "Print surface opened for {}x{}mm page",
        doc.page_width_mm,
        doc.page_height_mm
    );
    Ok(())
}

/// Report a refused print to the user, as the control surface expects.
pub(crate) fn alert_print_error(error: &PrintError) {
    log::warn!("Print aborted: {error}");
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&error.to_string());
    }
}

fn open_popup(window: &Window) -> Option<Window> {
    match window.open_with_url_and_target_and_features("", "_blank", POPUP_FEATURES) {
        Ok(popup) => popup,
        Err(e) => {
            log::warn!("window.open failed: {e:?}");
            None
        }
    }
}

fn write_document(popup: &Window, html: &str) -> Result<(), JsValue> {
    let document = popup
        .document()
        .ok_or_else(|| JsValue::from_str("Popup has no document"))?
        .dyn_into::<HtmlDocument>()?;
    document.open()?;
    document.write(&js_sys::Array::of1(&JsValue::from_str(html)))?;
    document.close()?;
    Ok(())
}
