use analyzer_common::AttachError;

/// Why the submit guard could not be mounted on the page.
///
/// A missing form, button or loader is not an error; those are skipped.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("failed to listen for DOMContentLoaded: {0}")]
    ReadyListener(String),
    #[error(transparent)]
    Attach(#[from] AttachError),
}
