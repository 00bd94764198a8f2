pub mod calendar;
pub mod category;
pub mod dashboard;
pub mod init;
pub mod notify;
pub mod project;
pub mod render;
pub mod task;

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use taskdeck_store::workspace::Workspace;

/// Overrides workspace discovery with an explicit root directory.
pub const DIR_ENV: &str = "TASKDECK_DIR";

/// Directory that `init` creates the workspace in.
fn target_dir() -> Result<PathBuf> {
    match env::var_os(DIR_ENV) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => env::current_dir().context("failed to get current directory"),
    }
}

fn open_workspace() -> Result<Workspace> {
    match env::var_os(DIR_ENV) {
        Some(dir) => Workspace::open(PathBuf::from(&dir))
            .with_context(|| format!("no taskdeck workspace at {}", PathBuf::from(dir).display())),
        None => {
            let cwd = env::current_dir()?;
            Workspace::discover(&cwd).context("not a taskdeck workspace (or any parent)")
        }
    }
}
