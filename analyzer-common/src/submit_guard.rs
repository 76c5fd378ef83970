//! Form-submit guard for the analysis page.
//!
//! Once the form is submitted the loading indicator is shown and the submit
//! button is disabled and relabeled, so a second click can't start another
//! analysis while the first request is in flight. Missing elements are
//! skipped, never reported.

use tracing::{debug, info};

use crate::config::GuardConfig;
use crate::page::{AttachError, LoadingIndicator, Page, SubmitButton, SubmitForm};

/// Mutations applied on every submission. Holds the elements found at
/// initialization for the rest of the page's lifetime.
pub struct SubmitGuard<B, L> {
    button: Option<B>,
    loader: Option<L>,
    busy_label: String,
    loader_display: String,
}

impl<B: SubmitButton, L: LoadingIndicator> SubmitGuard<B, L> {
    pub fn new(button: Option<B>, loader: Option<L>, config: &GuardConfig) -> Self {
        Self {
            button,
            loader,
            busy_label: config.busy_label.clone(),
            loader_display: config.loader_display.clone(),
        }
    }

    /// Submit handler. Does not cancel the event.
    pub fn on_submit(&self) {
        info!("analysis form submitted");

        if let Some(ref loader) = self.loader {
            loader.set_display(&self.loader_display);
        }
        if let Some(ref button) = self.button {
            button.set_disabled(true);
            button.set_label(&self.busy_label);
        }
    }
}

/// Looks up the guarded elements and, if the form exists, attaches the guard
/// as its submit listener.
///
/// Returns `Ok(None)` when there is no form to guard. The returned listener
/// must be kept alive for as long as the guard should stay attached.
pub fn install<P: Page>(
    page: &P,
    config: &GuardConfig,
) -> Result<Option<<P::Form as SubmitForm>::Listener>, AttachError> {
    let Some(form) = page.form(&config.form_id) else {
        debug!(id = %config.form_id, "no analysis form on page, submit guard not attached");
        return Ok(None);
    };

    let button = page.button(&config.button_id);
    if button.is_none() {
        debug!(id = %config.button_id, "submit button not found");
    }
    let loader = page.loader(&config.loader_id);
    if loader.is_none() {
        debug!(id = %config.loader_id, "loading indicator not found");
    }

    let guard = SubmitGuard::new(button, loader, config);
    let listener = form.on_submit(Box::new(move || guard.on_submit()))?;

    info!(id = %config.form_id, "submit guard attached");
    Ok(Some(listener))
}
