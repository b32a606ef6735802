//! PrecisionPrint WASM - WebAssembly bindings for PrecisionPrint
//!
//! This crate exposes the precision-print-core editor to the browser and
//! supplies the pieces that need a DOM: global drag capture, the popup print
//! surface and the image generation transport.
//!
//! # Module Structure
//!
//! - `editor` - `JsEditor`, the session object the page talks to
//! - `drag` - Window-level pointer capture with scoped listener registration
//! - `print` - Popup print surface
//! - `generate` - Fetch client for the image generation service
//! - `types` - Serializable state snapshots for the control surface
//! - `logger` - `log` facade to browser console bridge
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor } from '@precision-print/wasm';
//!
//! await init();
//! const editor = new JsEditor();
//! editor.resize_viewport(window.innerWidth, window.innerHeight);
//! ```

use wasm_bindgen::prelude::*;

mod drag;
mod editor;
mod generate;
mod logger;
mod print;
mod types;

pub use editor::JsEditor;
pub use types::{EditorSnapshot, PreviewSnapshot};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::install(log::LevelFilter::Warn);
}

/// Change console verbosity: `"off"`, `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::install(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
