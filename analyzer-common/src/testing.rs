//! In-memory page for exercising the submit guard without a browser.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::page::{AttachError, LoadingIndicator, Page, SubmitButton, SubmitForm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderState {
    pub display: String,
}

type Handler = Box<dyn FnMut()>;

#[derive(Default)]
struct FormState {
    handlers: Vec<(u64, Handler)>,
    // Listeners dropped while their handlers were taken out to run.
    removed: HashSet<u64>,
    submits: usize,
}

#[derive(Default)]
struct Forms {
    by_id: HashMap<String, FormState>,
    next_listener: u64,
    refuse: bool,
}

/// A page built up element by element. Cloning shares the same elements.
#[derive(Clone, Default)]
pub struct TestPage {
    forms: Rc<RefCell<Forms>>,
    buttons: HashMap<String, Rc<RefCell<ButtonState>>>,
    loaders: HashMap<String, Rc<RefCell<LoaderState>>>,
}

impl TestPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(self, id: &str) -> Self {
        self.forms
            .borrow_mut()
            .by_id
            .insert(id.to_string(), FormState::default());
        self
    }

    pub fn with_button(mut self, id: &str, label: &str) -> Self {
        self.buttons.insert(
            id.to_string(),
            Rc::new(RefCell::new(ButtonState {
                disabled: false,
                label: label.to_string(),
            })),
        );
        self
    }

    pub fn with_loader(mut self, id: &str, display: &str) -> Self {
        self.loaders.insert(
            id.to_string(),
            Rc::new(RefCell::new(LoaderState {
                display: display.to_string(),
            })),
        );
        self
    }

    /// Make every form reject listener registration.
    pub fn refusing_listeners(self) -> Self {
        self.forms.borrow_mut().refuse = true;
        self
    }

    /// Fires a submit event on the form. A no-op when there is no such form.
    pub fn submit(&self, form_id: &str) {
        // Handlers run outside the borrow so they can't observe a locked page.
        let mut handlers = {
            let mut forms = self.forms.borrow_mut();
            let Some(form) = forms.by_id.get_mut(form_id) else {
                return;
            };
            form.submits += 1;
            std::mem::take(&mut form.handlers)
        };

        for (_, handler) in handlers.iter_mut() {
            handler();
        }

        let mut forms = self.forms.borrow_mut();
        if let Some(form) = forms.by_id.get_mut(form_id) {
            let removed = std::mem::take(&mut form.removed);
            handlers.retain(|(id, _)| !removed.contains(id));
            handlers.append(&mut form.handlers);
            form.handlers = handlers;
        }
    }

    pub fn listener_count(&self, form_id: &str) -> usize {
        self.forms
            .borrow()
            .by_id
            .get(form_id)
            .map_or(0, |f| f.handlers.len())
    }

    pub fn submit_count(&self, form_id: &str) -> usize {
        self.forms
            .borrow()
            .by_id
            .get(form_id)
            .map_or(0, |f| f.submits)
    }

    pub fn button_state(&self, id: &str) -> Option<ButtonState> {
        self.buttons.get(id).map(|b| b.borrow().clone())
    }

    pub fn loader_state(&self, id: &str) -> Option<LoaderState> {
        self.loaders.get(id).map(|l| l.borrow().clone())
    }
}

pub struct TestForm {
    id: String,
    forms: Rc<RefCell<Forms>>,
}

/// Removes its handler from the form when dropped.
#[derive(Debug)]
pub struct TestListener {
    form_id: String,
    listener_id: u64,
    forms: Rc<RefCell<Forms>>,
}

impl Drop for TestListener {
    fn drop(&mut self) {
        if let Ok(mut forms) = self.forms.try_borrow_mut() {
            if let Some(form) = forms.by_id.get_mut(&self.form_id) {
                let before = form.handlers.len();
                form.handlers.retain(|(id, _)| *id != self.listener_id);
                if form.handlers.len() == before {
                    form.removed.insert(self.listener_id);
                }
            }
        }
    }
}

impl std::fmt::Debug for Forms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forms")
            .field("forms", &self.by_id.len())
            .field("refuse", &self.refuse)
            .finish()
    }
}

impl SubmitForm for TestForm {
    type Listener = TestListener;

    fn on_submit(&self, handler: Box<dyn FnMut()>) -> Result<TestListener, AttachError> {
        let mut forms = self.forms.borrow_mut();
        if forms.refuse {
            return Err(AttachError("listener refused".to_string()));
        }
        let listener_id = forms.next_listener;
        forms.next_listener += 1;
        forms
            .by_id
            .entry(self.id.clone())
            .or_default()
            .handlers
            .push((listener_id, handler));

        Ok(TestListener {
            form_id: self.id.clone(),
            listener_id,
            forms: self.forms.clone(),
        })
    }
}

pub struct TestButton(Rc<RefCell<ButtonState>>);

impl SubmitButton for TestButton {
    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn set_label(&self, label: &str) {
        self.0.borrow_mut().label = label.to_string();
    }
}

pub struct TestLoader(Rc<RefCell<LoaderState>>);

impl LoadingIndicator for TestLoader {
    fn set_display(&self, value: &str) {
        self.0.borrow_mut().display = value.to_string();
    }
}

impl Page for TestPage {
    type Form = TestForm;
    type Button = TestButton;
    type Loader = TestLoader;

    fn form(&self, id: &str) -> Option<TestForm> {
        self.forms
            .borrow()
            .by_id
            .contains_key(id)
            .then(|| TestForm {
                id: id.to_string(),
                forms: self.forms.clone(),
            })
    }

    fn button(&self, id: &str) -> Option<TestButton> {
        self.buttons.get(id).cloned().map(TestButton)
    }

    fn loader(&self, id: &str) -> Option<TestLoader> {
        self.loaders.get(id).cloned().map(TestLoader)
    }
}
