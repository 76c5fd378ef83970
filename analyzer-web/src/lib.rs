//! Browser entry point for the review analysis page.
//!
//! On load, waits for the document to be ready and then attaches the submit
//! guard to the analysis form.

pub mod dom;
pub mod error;
pub mod logging;
pub mod wasm_utils;

use std::cell::RefCell;
use std::rc::Rc;

use analyzer_common::{install, GuardConfig, ReadyOnce};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

use dom::DomPage;
use error::MountError;
use wasm_utils::{describe_js_error, EventListener};

thread_local! {
    static MOUNT: Rc<PageMount> = Rc::new(PageMount::default());
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(logging::DEFAULT_FILTER);

    if let Err(e) = mount(GuardConfig::default()) {
        warn!("submit guard not mounted: {e}");
    }
}

/// Attaches the submit guard to the current document once it is ready.
pub fn mount(config: GuardConfig) -> Result<(), MountError> {
    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;
    MOUNT.with(|mount| mount.attach(&document, config))
}

/// Ready handling for one document. Keeps its listeners alive for as long
/// as it lives; the page-wide instance lives in a thread-local.
#[derive(Default)]
pub struct PageMount {
    ready: ReadyOnce,
    ready_listener: RefCell<Option<EventListener>>,
    submit_listener: RefCell<Option<EventListener>>,
}

impl PageMount {
    /// Runs the ready path now if the document has finished parsing,
    /// otherwise on `DOMContentLoaded`.
    pub fn attach(
        self: &Rc<Self>,
        document: &web_sys::Document,
        config: GuardConfig,
    ) -> Result<(), MountError> {
        if document.ready_state() != "loading" {
            return self.on_ready(document, &config);
        }
        self.wait_for_ready(document, config)
    }

    fn wait_for_ready(
        self: &Rc<Self>,
        document: &web_sys::Document,
        config: GuardConfig,
    ) -> Result<(), MountError> {
        let mount = Rc::downgrade(self);
        let ready_document = document.clone();
        let listener = EventListener::new(document, "DOMContentLoaded", move |_| {
            let Some(mount) = mount.upgrade() else {
                return;
            };
            if let Err(e) = mount.on_ready(&ready_document, &config) {
                warn!("submit guard not mounted: {e}");
            }
        })
        .map_err(|e| MountError::ReadyListener(describe_js_error(&e)))?;

        *self.ready_listener.borrow_mut() = Some(listener);
        Ok(())
    }

    /// Attaches the guard on the first call; later calls do nothing.
    pub fn on_ready(
        &self,
        document: &web_sys::Document,
        config: &GuardConfig,
    ) -> Result<(), MountError> {
        let installed = self
            .ready
            .run(|| install(&DomPage::new(document.clone()), config));

        let Some(result) = installed else {
            debug!("document ready already handled");
            return Ok(());
        };

        if let Some(listener) = result? {
            *self.submit_listener.borrow_mut() = Some(listener);
        }
        Ok(())
    }

    #[cfg(all(test, target_arch = "wasm32"))]
    fn is_guarding(&self) -> bool {
        self.submit_listener.borrow().is_some()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use analyzer_common::config::{BUSY_LABEL, LOADER_DISPLAY};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const SVG_NS: &str = "http://www.w3.org/2000/svg";

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Page elements under a detached-on-drop container, with ids unique to
    /// the test so tests don't see each other's markup.
    struct Fixture {
        root: web_sys::Element,
        config: GuardConfig,
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            self.root.remove();
        }
    }

    impl Fixture {
        fn new(prefix: &str) -> Self {
            let root = document().create_element("div").unwrap();
            document().body().unwrap().append_child(&root).unwrap();
            let config = GuardConfig {
                form_id: format!("{prefix}-form"),
                button_id: format!("{prefix}-button"),
                loader_id: format!("{prefix}-loader"),
                ..Default::default()
            };
            Self { root, config }
        }

        fn with_form(self) -> Self {
            let form = document().create_element("form").unwrap();
            form.set_id(&self.config.form_id);
            self.root.append_child(&form).unwrap();
            self
        }

        fn with_button(self) -> Self {
            let button = document().create_element("button").unwrap();
            button.set_id(&self.config.button_id);
            button.set_text_content(Some("حلل"));
            let parent = document()
                .get_element_by_id(&self.config.form_id)
                .unwrap_or_else(|| self.root.clone());
            parent.append_child(&button).unwrap();
            self
        }

        fn with_html_loader(self) -> Self {
            let loader = document().create_element("div").unwrap();
            self.add_loader(loader)
        }

        fn with_svg_loader(self) -> Self {
            let loader = document().create_element_ns(Some(SVG_NS), "svg").unwrap();
            self.add_loader(loader)
        }

        fn add_loader(self, loader: web_sys::Element) -> Self {
            loader.set_id(&self.config.loader_id);
            loader.set_attribute("style", "display: none").unwrap();
            self.root.append_child(&loader).unwrap();
            self
        }

        fn full(prefix: &str) -> Self {
            Self::new(prefix).with_form().with_button().with_html_loader()
        }

        /// Dispatches a cancelable submit event; returns false if a listener
        /// cancelled it.
        fn submit(&self) -> bool {
            let init = web_sys::EventInit::new();
            init.set_bubbles(true);
            init.set_cancelable(true);
            let event = web_sys::Event::new_with_event_init_dict("submit", &init).unwrap();
            let target = document()
                .get_element_by_id(&self.config.form_id)
                .unwrap_or_else(|| self.root.clone());
            target.dispatch_event(&event).unwrap()
        }

        fn loader_display(&self) -> String {
            let loader = document().get_element_by_id(&self.config.loader_id).unwrap();
            let style: web_sys::CssStyleDeclaration =
                js_sys::Reflect::get(&loader, &"style".into()).unwrap().unchecked_into();
            style.get_property_value("display").unwrap()
        }

        fn button(&self) -> web_sys::Element {
            document().get_element_by_id(&self.config.button_id).unwrap()
        }

        fn button_disabled(&self) -> bool {
            js_sys::Reflect::get(&self.button(), &"disabled".into())
                .unwrap()
                .as_bool()
                .unwrap_or(false)
        }

        fn button_label(&self) -> String {
            self.button().text_content().unwrap_or_default()
        }
    }

    #[wasm_bindgen_test]
    fn submit_shows_loader_and_disables_button() {
        let page = Fixture::full("all");
        let mount = Rc::new(PageMount::default());
        mount.on_ready(&document(), &page.config).unwrap();
        assert!(mount.is_guarding());

        assert_eq!(page.loader_display(), "none");
        assert!(!page.button_disabled());

        assert!(page.submit(), "submit event must not be cancelled");

        assert_eq!(page.loader_display(), LOADER_DISPLAY);
        assert!(page.button_disabled());
        assert_eq!(page.button_label(), BUSY_LABEL);
    }

    #[wasm_bindgen_test]
    fn svg_loader_is_shown() {
        let page = Fixture::new("svg")
            .with_form()
            .with_button()
            .with_svg_loader();
        let mount = Rc::new(PageMount::default());
        mount.on_ready(&document(), &page.config).unwrap();

        page.submit();

        assert_eq!(page.loader_display(), LOADER_DISPLAY);
        assert!(page.button_disabled());
    }

    #[wasm_bindgen_test]
    fn missing_loader_still_guards_button() {
        let page = Fixture::new("noloader").with_form().with_button();
        let mount = Rc::new(PageMount::default());
        mount.on_ready(&document(), &page.config).unwrap();

        page.submit();

        assert!(page.button_disabled());
        assert_eq!(page.button_label(), BUSY_LABEL);
    }

    #[wasm_bindgen_test]
    fn missing_button_still_shows_loader() {
        let page = Fixture::new("nobutton").with_form().with_html_loader();
        let mount = Rc::new(PageMount::default());
        mount.on_ready(&document(), &page.config).unwrap();

        page.submit();

        assert_eq!(page.loader_display(), LOADER_DISPLAY);
    }

    #[wasm_bindgen_test]
    fn missing_form_attaches_nothing() {
        let page = Fixture::new("noform").with_button().with_html_loader();
        let mount = Rc::new(PageMount::default());
        mount.on_ready(&document(), &page.config).unwrap();
        assert!(!mount.is_guarding());

        page.submit();

        assert_eq!(page.loader_display(), "none");
        assert!(!page.button_disabled());
        assert_eq!(page.button_label(), "حلل");
    }

    #[wasm_bindgen_test]
    fn second_ready_does_not_attach_again() {
        let page = Fixture::full("twice");
        let mount = Rc::new(PageMount::default());
        mount.on_ready(&document(), &page.config).unwrap();
        let relabel = GuardConfig {
            busy_label: "again".into(),
            ..page.config.clone()
        };
        mount.on_ready(&document(), &relabel).unwrap();

        page.submit();

        assert_eq!(page.button_label(), BUSY_LABEL);
    }

    #[wasm_bindgen_test]
    fn parsed_document_attaches_immediately() {
        let page = Fixture::full("parsed");
        let mount = Rc::new(PageMount::default());
        mount.attach(&document(), page.config.clone()).unwrap();

        assert!(mount.is_guarding());
    }

    #[wasm_bindgen_test]
    fn loading_document_waits_for_content_loaded() {
        let page = Fixture::full("loading");
        let mount = Rc::new(PageMount::default());
        mount.wait_for_ready(&document(), page.config.clone()).unwrap();
        assert!(!mount.is_guarding());

        page.submit();
        assert_eq!(page.loader_display(), "none");

        let ready = web_sys::Event::new("DOMContentLoaded").unwrap();
        document().dispatch_event(&ready).unwrap();
        document().dispatch_event(&ready).unwrap();
        assert!(mount.is_guarding());

        page.submit();
        assert_eq!(page.loader_display(), LOADER_DISPLAY);
        assert_eq!(page.button_label(), BUSY_LABEL);
    }

    #[wasm_bindgen_test]
    fn dropped_mount_stops_guarding() {
        let page = Fixture::full("dropped");
        let mount = Rc::new(PageMount::default());
        mount.on_ready(&document(), &page.config).unwrap();
        drop(mount);

        page.submit();

        assert_eq!(page.loader_display(), "none");
        assert!(!page.button_disabled());
    }
}
