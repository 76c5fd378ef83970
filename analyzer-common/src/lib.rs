pub mod config;
pub mod page;
pub mod ready;
pub mod submit_guard;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::GuardConfig;
pub use page::{AttachError, LoadingIndicator, Page, SubmitButton, SubmitForm};
pub use ready::ReadyOnce;
pub use submit_guard::{install, SubmitGuard};
