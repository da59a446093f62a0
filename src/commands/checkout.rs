//! Run `git checkout` and record the refs it switched to

use anyhow::Result;
use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use super::dir_key;
use crate::git::Git;
use crate::storage::HistoryStore;

/// Handle checkout - pass `args` through to `git checkout`, then record
/// every argument that names an existing ref.
/// Nothing is recorded if the checkout itself fails.
pub fn handle<G: Git, S: HistoryStore, W: Write>(
    git: &G,
    store: &S,
    cwd: &Path,
    args: &[OsString],
    output: &mut W,
) -> Result<()> {
    git.checkout(args)?;

    record_commits(git, store, cwd, args, output)
}

/// Record each recordable argument in turn, stopping at the first failure
pub fn record_commits<G: Git, S: HistoryStore, W: Write>(
    git: &G,
    store: &S,
    cwd: &Path,
    args: &[OsString],
    output: &mut W,
) -> Result<()> {
    for arg in args {
        // History keys and values are JSON strings
        let Some(arg) = arg.to_str() else {
            tracing::debug!("skipping non UTF-8 argument {:?}", arg);
            continue;
        };

        if is_recordable(git, cwd, arg) {
            record_commit(store, cwd, arg, output)?;
        }
    }

    Ok(())
}

/// Whether `arg` should be recorded as a visited ref.
///
/// Options (`-…`), `@` refs, names of files in `cwd` and anything git cannot
/// resolve are skipped.
pub fn is_recordable<G: Git>(git: &G, cwd: &Path, arg: &str) -> bool {
    if arg.starts_with('-') {
        tracing::debug!("skipping option {:?}", arg);
        return false;
    }

    if arg.starts_with('@') {
        tracing::debug!("skipping special ref {:?}", arg);
        return false;
    }

    // A file of the same name makes the argument ambiguous; treat it as a path
    if cwd.join(arg).exists() {
        tracing::debug!("skipping {:?}: file exists", arg);
        return false;
    }

    if !git.commit_exists(arg) {
        tracing::debug!("skipping {:?}: not a commit", arg);
        return false;
    }

    true
}

/// Move `reference` to the most recent position of the history for `cwd`
pub fn record_commit<S: HistoryStore, W: Write>(
    store: &S,
    cwd: &Path,
    reference: &str,
    output: &mut W,
) -> Result<()> {
    writeln!(output, "recording {}", reference)?;

    let dir = dir_key(cwd);
    store.update_history(|history| {
        history.record(&dir, reference);
        Ok(())
    })?;

    tracing::info!("recorded {} for {}", reference, dir);
    Ok(())
}
