// src/progress.rs
/// Lightweight progress reporting used by long-running operations (fetch/extract).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One logical unit completed (a champion extracted, a page collected).
    fn item_done(&mut self, _index: usize, _name: &str) {}

    /// One logical unit was skipped or failed; processing continues.
    fn item_failed(&mut self, _index: usize, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
