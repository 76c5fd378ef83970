use std::cell::Cell;

/// Runs page initialization at most once, however many ready signals arrive.
#[derive(Debug, Default)]
pub struct ReadyOnce {
    fired: Cell<bool>,
}

impl ReadyOnce {
    pub const fn new() -> Self {
        Self {
            fired: Cell::new(false),
        }
    }

    /// Runs `f` on the first call and returns its result. Later calls return `None`.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> Option<T> {
        if self.fired.replace(true) {
            return None;
        }
        Some(f())
    }
}
