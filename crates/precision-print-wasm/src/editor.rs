//! WASM bindings for the editing session.
//!
//! `JsEditor` wraps a core [`Editor`] and adds the browser-only pieces:
//! window-level drag capture, the popup print surface and the fetch-based
//! image generation client.

use std::cell::RefCell;
use std::rc::Rc;

use precision_print_core::{
    Editor, GenerationConfig, ImageSource, Orientation, PrintError, ViewportLayout,
};
use wasm_bindgen::prelude::*;

use crate::drag::{DragCapture, DragRelease};
use crate::generate::fetch_generated_image;
use crate::print::{alert_print_error, open_print_surface};
use crate::types::{EditorSnapshot, PreviewSnapshot};

/// An A4 placement editor for JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const editor = new JsEditor();
/// editor.set_on_change(() => render(editor.snapshot(), editor.preview()));
/// editor.resize_viewport(window.innerWidth, window.innerHeight);
///
/// img.onload = () => editor.load_image_url(url, img.naturalWidth, img.naturalHeight);
/// imageEl.addEventListener('mousedown', (e) => {
///   e.preventDefault();
///   editor.pointer_down(e.clientX, e.clientY);
/// });
/// ```
#[wasm_bindgen]
pub struct JsEditor {
    editor: Rc<RefCell<Editor>>,
    on_change: Rc<RefCell<Option<js_sys::Function>>>,
    drag: DragCapture,
}

impl JsEditor {
    fn with_editor(editor: Editor) -> JsEditor {
        let editor = Rc::new(RefCell::new(editor));
        let on_change = Rc::new(RefCell::new(None));
        JsEditor {
            drag: DragCapture::new(editor.clone(), on_change.clone()),
            editor,
            on_change,
        }
    }

    fn install(&mut self, source: ImageSource) {
        install_source(&self.drag.release_handle(), &self.editor, source);
    }
}

/// End any drag on the current image, then load the new one.
///
/// Every image load goes through here so window capture never outlives the
/// drag it was attached for.
fn install_source(release: &DragRelease, editor: &RefCell<Editor>, source: ImageSource) {
    release.release();
    editor.borrow_mut().load_image(source);
}

/// Apply a finished generation. Returns whether an image was installed.
fn finish_generation(
    release: &DragRelease,
    editor: &RefCell<Editor>,
    generated: Option<ImageSource>,
) -> bool {
    match generated {
        Some(source) => {
            install_source(release, editor, source);
            true
        }
        None => false,
    }
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor with the default layout constants.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditor {
        Self::with_editor(Editor::new())
    }

    /// Create an editor with layout overrides, e.g. `{ sidebarWidthPx: 384 }`.
    pub fn with_layout(layout: JsValue) -> Result<JsEditor, JsValue> {
        let layout: ViewportLayout = serde_wasm_bindgen::from_value(layout)?;
        Ok(Self::with_editor(Editor::with_layout(layout)))
    }

    /// Register a callback run after drag moves change the placement.
    pub fn set_on_change(&self, callback: Option<js_sys::Function>) {
        *self.on_change.borrow_mut() = callback;
    }

    // ------------------------------------------------------------------
    // Image sources
    // ------------------------------------------------------------------

    /// Install an image from a URL that the page has already loaded.
    ///
    /// Call this from the image's `load` handler, passing its natural size,
    /// so a URL that fails to load leaves the placement untouched.
    pub fn load_image_url(
        &mut self,
        url: &str,
        natural_width: Option<u32>,
        natural_height: Option<u32>,
    ) -> Result<(), JsValue> {
        let mut source =
            ImageSource::from_url(url).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if let (Some(w), Some(h)) = (natural_width, natural_height) {
            source = source.with_natural_size(w, h);
        }
        self.install(source);
        Ok(())
    }

    /// Install an uploaded file's bytes. Returns the `data:` URL to display.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<String, JsValue> {
        let source =
            ImageSource::from_bytes(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let uri = source.uri.clone();
        self.install(source);
        Ok(uri)
    }

    /// Record the natural size once the browser has decoded the image.
    pub fn set_natural_size(&mut self, width: u32, height: u32) {
        self.editor.borrow_mut().set_natural_size(width, height);
    }

    /// Generate an image from a prompt and install it.
    ///
    /// `config` is `{ apiKey, model?, endpoint? }`. Resolves to `true` when an
    /// image was installed and `false` when the service is unconfigured or
    /// returned no image. The placement is untouched on failure.
    pub fn generate_image(&self, prompt: String, config: JsValue) -> js_sys::Promise {
        let editor = self.editor.clone();
        let release = self.drag.release_handle();
        wasm_bindgen_futures::future_to_promise(async move {
            let config: GenerationConfig = if config.is_undefined() || config.is_null() {
                GenerationConfig::default()
            } else {
                serde_wasm_bindgen::from_value(config)?
            };
            let generated = fetch_generated_image(&prompt, &config).await?;
            Ok(JsValue::from_bool(finish_generation(&release, &editor, generated)))
        })
    }

    // ------------------------------------------------------------------
    // Controls
    // ------------------------------------------------------------------

    /// Advance the rotation by 90°. Returns the new angle in degrees.
    pub fn rotate(&mut self) -> i32 {
        self.editor.borrow_mut().rotate().degrees()
    }

    /// Set the rotation from degrees, snapped down to a quarter turn.
    pub fn set_rotation(&mut self, degrees: i32) -> i32 {
        self.editor.borrow_mut().set_rotation_degrees(degrees).degrees()
    }

    /// Overwrite the scale from the slider. Returns the stored scale.
    pub fn set_scale(&mut self, scale: f64) -> f64 {
        self.editor.borrow_mut().set_scale(scale)
    }

    /// Restore offset, scale and rotation. The image is kept.
    pub fn reset(&mut self) {
        self.editor.borrow_mut().reset();
    }

    /// Set `"portrait"` or `"landscape"`. Returns the new screen scale.
    pub fn set_orientation(&mut self, orientation: &str) -> Result<f64, JsValue> {
        let orientation = Orientation::parse(orientation)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown orientation: {orientation}")))?;
        let mut editor = self.editor.borrow_mut();
        editor.set_orientation(orientation);
        Ok(editor.screen_scale())
    }

    pub fn set_show_grid(&mut self, show_grid: bool) {
        self.editor.borrow_mut().set_show_grid(show_grid);
    }

    /// Refit the preview to a new viewport. Returns the new screen scale.
    pub fn resize_viewport(&mut self, width: f64, height: f64) -> f64 {
        self.editor.borrow_mut().resize_viewport(width, height)
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    /// Pointer pressed over the image. Starts window-level capture.
    ///
    /// Returns `false` when there is no image to drag.
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) -> Result<bool, JsValue> {
        if !self.editor.borrow_mut().pointer_down(client_x, client_y) {
            return Ok(false);
        }
        if let Err(e) = self.drag.capture() {
            // Without capture the drag could never end; abandon it.
            self.drag.release();
            return Err(e);
        }
        Ok(true)
    }

    /// Feed a pointer move directly, for hosts that capture pointer events themselves.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> bool {
        self.editor.borrow_mut().pointer_move(client_x, client_y)
    }

    /// End the drag and release window capture.
    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    #[wasm_bindgen(getter)]
    pub fn dragging(&self) -> bool {
        self.editor.borrow().is_dragging()
    }

    #[wasm_bindgen(getter)]
    pub fn capturing(&self) -> bool {
        self.drag.is_capturing()
    }

    // ------------------------------------------------------------------
    // State and rendering
    // ------------------------------------------------------------------

    #[wasm_bindgen(getter)]
    pub fn screen_scale(&self) -> f64 {
        self.editor.borrow().screen_scale()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.editor.borrow().placement().has_image()
    }

    /// Current state for the control surface.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = EditorSnapshot::from_editor(&self.editor.borrow());
        Ok(serde_wasm_bindgen::to_value(&snapshot)?)
    }

    /// Preview transforms and markup.
    pub fn preview(&self) -> Result<JsValue, JsValue> {
        let preview = PreviewSnapshot::from_editor(&self.editor.borrow());
        Ok(serde_wasm_bindgen::to_value(&preview)?)
    }

    /// The standalone print document, without opening anything.
    pub fn print_html(&self) -> Result<String, JsValue> {
        self.editor
            .borrow()
            .prepare_print()
            .map(|doc| doc.html)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Open the print surface.
    ///
    /// With no image, or when the popup is blocked, the user is alerted and
    /// the call fails without changing any state.
    pub fn print(&self) -> Result<(), JsValue> {
        let result: Result<(), PrintError> = self
            .editor
            .borrow()
            .prepare_print()
            .and_then(|doc| open_print_surface(&doc));
        result.map_err(|e| {
            alert_print_error(&e);
            JsValue::from_str(&e.to_string())
        })
    }
}

impl Default for JsEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_round_trip() {
        let mut editor = JsEditor::new();
        assert!(!editor.has_image());
        editor.load_image_url("a.png", Some(800), Some(600)).unwrap();
        assert!(editor.has_image());

        assert_eq!(editor.rotate(), 90);
        assert_eq!(editor.set_scale(9.0), 3.0);
        editor.reset();
        assert_eq!(editor.editor.borrow().placement().scale, 1.0);
        assert_eq!(editor.editor.borrow().placement().rotation_degrees(), 0);
    }

    #[test]
    fn test_load_keeps_rotation() {
        let mut editor = JsEditor::new();
        editor.load_image_url("a.png", None, None).unwrap();
        editor.rotate();
        editor.load_image_url("b.png", None, None).unwrap();
        assert_eq!(editor.editor.borrow().placement().rotation_degrees(), 90);
    }

    #[test]
    fn test_natural_size_recorded() {
        let mut editor = JsEditor::new();
        editor.load_image_url("a.png", Some(40), Some(20)).unwrap();
        let size = editor.editor.borrow().placement().image.as_ref().unwrap().natural_size;
        assert_eq!(size.map(|s| (s.width, s.height)), Some((40, 20)));
    }

    #[test]
    fn test_resize_viewport() {
        let mut editor = JsEditor::new();
        let scale = editor.resize_viewport(10_000.0, 10_000.0);
        assert!((scale - 0.85).abs() < 1e-12);
        assert!((editor.screen_scale() - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_direct_pointer_move_without_drag() {
        let mut editor = JsEditor::new();
        assert!(!editor.pointer_move(10.0, 10.0));
        assert!(!editor.dragging());
    }

    #[test]
    fn test_pointer_down_without_image() {
        let mut editor = JsEditor::new();
        assert_eq!(editor.pointer_down(0.0, 0.0).ok(), Some(false));
        assert!(!editor.capturing());
    }

    #[test]
    fn test_finish_generation_without_image_keeps_placement() {
        let mut editor = JsEditor::new();
        editor.load_image_url("a.png", None, None).unwrap();
        editor.set_scale(2.0);
        let release = editor.drag.release_handle();
        assert!(!finish_generation(&release, &editor.editor, None));
        assert_eq!(editor.editor.borrow().placement().scale, 2.0);
        assert_eq!(editor.editor.borrow().placement().image.as_ref().unwrap().uri, "a.png");
    }

    #[test]
    fn test_finish_generation_installs_image() {
        let editor = JsEditor::new();
        let release = editor.drag.release_handle();
        let generated = ImageSource::from_url("data:image/png;base64,AAAA").unwrap();
        assert!(finish_generation(&release, &editor.editor, Some(generated)));
        assert!(editor.has_image());
        assert!(!editor.capturing());
    }

    #[test]
    fn test_print_html() {
        let mut editor = JsEditor::new();
        editor.load_image_url("a.png", None, None).unwrap();
        let html = editor.print_html().unwrap();
        assert!(html.contains("size: 210mm 297mm"));
    }
}
