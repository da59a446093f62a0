use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Checkout history as stored on disk:
/// `{ "<absolute-directory>": ["<ref>", ...] }`, oldest first.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct History {
    dirs: BTreeMap<String, Vec<String>>,
}

impl History {
    /// Refs recorded for `dir`, oldest first. Empty if nothing was recorded.
    pub fn refs(&self, dir: &str) -> &[String] {
        self.dirs.get(dir).map(Vec::as_slice).unwrap_or_default()
    }

    /// Mark `reference` as the most recently used ref for `dir`
    pub fn record(&mut self, dir: &str, reference: &str) {
        let refs = self.dirs.entry(dir.to_string()).or_default();
        append_uniq(refs, reference);
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

/// Append `value` to `refs`, dropping any earlier occurrence so it appears
/// exactly once, in last position.
pub fn append_uniq(refs: &mut Vec<String>, value: &str) {
    refs.retain(|existing| existing != value);
    refs.push(value.to_string());
}
