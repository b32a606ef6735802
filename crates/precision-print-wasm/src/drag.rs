//! Window-level pointer capture for image drags.
//!
//! While a drag is active, `mousemove` / `mouseup` / `blur` listeners are
//! attached to the window so a fast drag keeps tracking after the pointer
//! leaves the image. The listeners are held by a [`ListenerRegistration`]
//! guard: dropping it removes them. The guard is dropped on pointer-up, on
//! loss of focus, and when the editor itself is freed, so no stale global
//! listener survives a drag.
//!
//! The closures live as long as the capture object and are only registered
//! and unregistered; they are never dropped while the window can call them.

use std::cell::RefCell;
use std::rc::Rc;

use precision_print_core::Editor;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MouseEvent};

/// Listeners attached to one target. Detached on drop.
pub(crate) struct ListenerRegistration {
    target: EventTarget,
    listeners: Vec<(&'static str, js_sys::Function)>,
}

impl ListenerRegistration {
    /// Attach every listener, or none: a failure part way detaches the ones already added.
    pub(crate) fn attach(
        target: EventTarget,
        listeners: &[(&'static str, &js_sys::Function)],
    ) -> Result<Self, JsValue> {
        let mut registration = ListenerRegistration {
            target,
            listeners: Vec::with_capacity(listeners.len()),
        };
        for &(event, callback) in listeners {
            registration
                .target
                .add_event_listener_with_callback(event, callback)?;
            registration.listeners.push((event, callback.clone()));
        }
        Ok(registration)
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        for (event, callback) in self.listeners.drain(..) {
            if let Err(e) = self
                .target
                .remove_event_listener_with_callback(event, &callback)
            {
                log::warn!("Failed to remove {event} listener: {e:?}");
            }
        }
    }
}

type Registration = Rc<RefCell<Option<ListenerRegistration>>>;
type ChangeCallback = Rc<RefCell<Option<js_sys::Function>>>;

struct DragHandlers {
    on_move: Closure<dyn FnMut(MouseEvent)>,
    on_up: Closure<dyn FnMut(MouseEvent)>,
    on_blur: Closure<dyn FnMut(web_sys::Event)>,
}

/// Global pointer capture for one editor.
pub(crate) struct DragCapture {
    editor: Rc<RefCell<Editor>>,
    on_change: ChangeCallback,
    registration: Registration,
    handlers: Option<DragHandlers>,
}

impl DragCapture {
    pub(crate) fn new(editor: Rc<RefCell<Editor>>, on_change: ChangeCallback) -> Self {
        Self {
            editor,
            on_change,
            registration: Rc::new(RefCell::new(None)),
            handlers: None,
        }
    }

    /// Whether window listeners are currently attached.
    pub(crate) fn is_capturing(&self) -> bool {
        self.registration.borrow().is_some()
    }

    /// Attach the window listeners for the drag that just started.
    pub(crate) fn capture(&mut self) -> Result<(), JsValue> {
        if self.is_capturing() {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

        let editor = self.editor.clone();
        let on_change = self.on_change.clone();
        let registration = self.registration.clone();
        let handlers = self
            .handlers
            .get_or_insert_with(|| build_handlers(editor, on_change, registration));

        let attached = ListenerRegistration::attach(
            window.unchecked_into::<EventTarget>(),
            &[
                ("mousemove", handlers.on_move.as_ref().unchecked_ref()),
                ("mouseup", handlers.on_up.as_ref().unchecked_ref()),
                ("blur", handlers.on_blur.as_ref().unchecked_ref()),
            ],
        )?;
        *self.registration.borrow_mut() = Some(attached);
        Ok(())
    }

    /// Detach the window listeners, ending the drag if one is active.
    pub(crate) fn release(&mut self) {
        self.release_handle().release();
    }

    /// A handle that can end the capture from code that outlives this borrow,
    /// such as a pending future.
    pub(crate) fn release_handle(&self) -> DragRelease {
        DragRelease {
            editor: self.editor.clone(),
            registration: self.registration.clone(),
        }
    }
}

/// Ends a drag and detaches its window listeners.
#[derive(Clone)]
pub(crate) struct DragRelease {
    editor: Rc<RefCell<Editor>>,
    registration: Registration,
}

impl DragRelease {
    pub(crate) fn release(&self) {
        self.editor.borrow_mut().pointer_up();
        self.registration.borrow_mut().take();
    }
}

impl Drop for DragCapture {
    fn drop(&mut self) {
        // Detach before the closures go away.
        self.registration.borrow_mut().take();
    }
}

fn build_handlers(
    editor: Rc<RefCell<Editor>>,
    on_change: ChangeCallback,
    registration: Registration,
) -> DragHandlers {
    let on_move = {
        let editor = editor.clone();
        let on_change = on_change.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let moved = editor
                .borrow_mut()
                .pointer_move(f64::from(event.client_x()), f64::from(event.client_y()));
            if moved {
                event.prevent_default();
                notify(&on_change);
            }
        })
    };

    let end_drag = {
        let editor = editor.clone();
        let registration = registration.clone();
        move || {
            let ended = editor.borrow_mut().pointer_up();
            registration.borrow_mut().take();
            if ended {
                notify(&on_change);
            }
        }
    };

    let on_up = {
        let end_drag = end_drag.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| end_drag())
    };
    let on_blur = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| end_drag());

    DragHandlers {
        on_move,
        on_up,
        on_blur,
    }
}

/// Tell the host page the placement changed. Called with no borrows held.
fn notify(on_change: &ChangeCallback) {
    let callback = on_change.borrow().clone();
    if let Some(callback) = callback {
        if let Err(e) = callback.call0(&JsValue::NULL) {
            log::warn!("Change callback failed: {e:?}");
        }
    }
}
