use anyhow::{Context, Result};
use taskdeck_store::workspace::Workspace;

pub fn run() -> Result<()> {
    let dir = super::target_dir()?;
    let ws = Workspace::init(&dir).context("failed to initialize workspace")?;
    println!("Initialized empty taskdeck workspace in {}", ws.dir().display());
    Ok(())
}
