//! `web-sys` implementation of the page seam.

use analyzer_common::{AttachError, LoadingIndicator, Page, SubmitButton, SubmitForm};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};

use crate::wasm_utils::{describe_js_error, EventListener};

/// The live document, queried by element id.
pub struct DomPage {
    document: web_sys::Document,
}

impl DomPage {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Page for DomPage {
    type Form = DomForm;
    type Button = DomButton;
    type Loader = DomLoader;

    fn form(&self, id: &str) -> Option<DomForm> {
        self.document.get_element_by_id(id).map(DomForm)
    }

    fn button(&self, id: &str) -> Option<DomButton> {
        self.document.get_element_by_id(id).map(DomButton)
    }

    fn loader(&self, id: &str) -> Option<DomLoader> {
        let element = self.document.get_element_by_id(id)?;
        let element = match element.dyn_into::<web_sys::HtmlElement>() {
            Ok(el) => return Some(DomLoader::Html(el)),
            Err(element) => element,
        };
        match element.dyn_into::<web_sys::SvgElement>() {
            Ok(el) => Some(DomLoader::Svg(el)),
            Err(_) => {
                debug!(id, "loading indicator has no inline style, ignoring it");
                None
            }
        }
    }
}

pub struct DomForm(web_sys::Element);

impl SubmitForm for DomForm {
    type Listener = EventListener;

    fn on_submit(&self, mut handler: Box<dyn FnMut()>) -> Result<EventListener, AttachError> {
        // The event is left alone so the browser goes on to submit the form.
        EventListener::new(&self.0, "submit", move |_| handler())
            .map_err(|e| AttachError(describe_js_error(&e)))
    }
}

/// Any element with a `disabled` property: `<button>` or `<input type=submit>`.
pub struct DomButton(web_sys::Element);

impl SubmitButton for DomButton {
    fn set_disabled(&self, disabled: bool) {
        if let Err(e) = js_sys::Reflect::set(
            &self.0,
            &JsValue::from_str("disabled"),
            &JsValue::from_bool(disabled),
        ) {
            warn!("failed to disable submit button: {}", describe_js_error(&e));
        }
    }

    fn set_label(&self, label: &str) {
        self.0.set_text_content(Some(label));
    }
}

/// An element with an inline `style`: plain HTML or an inline `<svg>` spinner.
pub enum DomLoader {
    Html(web_sys::HtmlElement),
    Svg(web_sys::SvgElement),
}

impl LoadingIndicator for DomLoader {
    fn set_display(&self, value: &str) {
        let style = match self {
            Self::Html(el) => el.style(),
            Self::Svg(el) => el.style(),
        };
        if let Err(e) = style.set_property("display", value) {
            warn!("failed to show loading indicator: {}", describe_js_error(&e));
        }
    }
}
