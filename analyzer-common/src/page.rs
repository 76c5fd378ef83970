//! Seam between the submit guard and whatever hosts the page.
//!
//! The browser binding implements these over `web-sys` elements; tests use
//! the in-memory page in [`crate::testing`].

/// The host refused to register the submit listener.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to attach submit listener: {0}")]
pub struct AttachError(pub String);

/// A page whose elements can be looked up by identifier.
///
/// Every lookup may come back empty; callers skip what is missing.
pub trait Page {
    type Form: SubmitForm;
    type Button: SubmitButton + 'static;
    type Loader: LoadingIndicator + 'static;

    fn form(&self, id: &str) -> Option<Self::Form>;
    fn button(&self, id: &str) -> Option<Self::Button>;
    fn loader(&self, id: &str) -> Option<Self::Loader>;
}

/// A form that reports its submissions.
pub trait SubmitForm {
    /// Keeps the listener registered while alive.
    type Listener;

    /// Registers `handler` to run on every submit event. The event is never
    /// cancelled; native submission continues after the handler returns.
    fn on_submit(&self, handler: Box<dyn FnMut()>) -> Result<Self::Listener, AttachError>;
}

pub trait SubmitButton {
    fn set_disabled(&self, disabled: bool);
    fn set_label(&self, label: &str);
}

pub trait LoadingIndicator {
    /// Sets the CSS `display` value.
    fn set_display(&self, value: &str);
}
