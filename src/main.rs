#![deny(clippy::mod_module_files)]
use anyhow::{Context, Result};
use std::env;
use std::ffi::OsString;
use std::io;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod git;
mod storage;

use config::Config;
use git::SystemGit;
use storage::JsonFileStore;

fn main() -> Result<()> {
    init_logging();

    let args: Vec<OsString> = env::args_os().collect();

    let config = Config::load();
    let cwd = env::current_dir().context("Failed to determine current directory")?;

    let git = SystemGit::new(&config.git_program, &cwd);
    let store = JsonFileStore::new(&config.history_path);

    let stdout = io::stdout();
    let mut output = stdout.lock();

    commands::dispatch(&args, &git, &store, &cwd, &mut output)
}

/// Log to stderr, quiet unless RUST_LOG asks for more
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
