use anyhow::Result;

use super::History;

/// Trait for the persisted checkout history
pub trait HistoryStore {
    /// Read the full history.
    /// Returns an empty history if none has been recorded yet.
    fn read_history(&self) -> Result<History>;

    /// Replace the persisted history with `history`.
    /// Implementation should ensure atomicity (temp file + rename or equivalent).
    fn write_history(&self, history: &History) -> Result<()>;

    /// Read-modify-write the history using a closure.
    /// The updated history is persisted only if the closure succeeds.
    fn update_history<F>(&self, update_fn: F) -> Result<()>
    where
        F: FnOnce(&mut History) -> Result<()>;
}
