pub mod checkout;
pub mod list;

use anyhow::Result;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::Path;

use crate::git::Git;
use crate::storage::HistoryStore;

/// Flag that selects history listing instead of checkout
pub const LIST_FLAG: &str = "--list";

/// Dispatch a full argument vector (program name first) to list or checkout
pub fn dispatch<G: Git, S: HistoryStore, W: Write>(
    args: &[OsString],
    git: &G,
    store: &S,
    cwd: &Path,
    output: &mut W,
) -> Result<()> {
    let args = args.get(1..).unwrap_or_default();

    if args.first().map(OsString::as_os_str) == Some(OsStr::new(LIST_FLAG)) {
        return list::handle(store, cwd, output);
    }

    checkout::handle(git, store, cwd, args, output)
}

/// Key under which history for `cwd` is stored
pub fn dir_key(cwd: &Path) -> String {
    cwd.to_string_lossy().into_owned()
}
