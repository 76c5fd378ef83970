//! WASM utilities for browser interop
//!
//! A JavaScript listener backed by a Rust `Closure` is only valid while the
//! closure is alive. Instead of `Closure::forget()`, the closure is owned by
//! an [`EventListener`] that detaches it on drop, so the listener's lifetime
//! follows ordinary Rust ownership:
//!
//! ```ignore
//! let listener = EventListener::new(&form, "submit", |_| { /* ... */ })?;
//! // Keep `listener` somewhere that lives as long as the page.
//! drop(listener); // detached
//! ```

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// An event listener on any DOM event target, removed when dropped.
pub struct EventListener {
    target: web_sys::EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventListener {
    /// Attaches `callback` to `target` for `event_name`.
    pub fn new(
        target: &web_sys::EventTarget,
        event_name: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback: Closure<dyn FnMut(web_sys::Event)> = Closure::wrap(Box::new(callback));

        target.add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            event_name,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Best-effort text for a thrown JS value.
pub fn describe_js_error(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
