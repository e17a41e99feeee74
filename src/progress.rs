// src/progress.rs
/// Lightweight progress reporting used by the long-running live scrape.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of top-level branches.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one top-level letter's subtree is fully resolved.
    fn letter_done(&mut self, _letter: char) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
