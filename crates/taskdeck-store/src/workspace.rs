use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backend::FileBackend;
use crate::config::Config;
use crate::error::StoreError;
use crate::store::TaskStore;

const WORKSPACE_DIR: &str = ".taskdeck";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";

/// An on-disk task workspace.
///
/// Layout:
/// - `.taskdeck/config.json`  settings, see [`Config`]
/// - `.taskdeck/data/`        one JSON file per collection
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Create a new workspace at `path`.
    pub fn init(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let dir = root.join(WORKSPACE_DIR);

        if dir.exists() {
            return Err(StoreError::WorkspaceExists(dir.display().to_string()));
        }

        fs::create_dir_all(dir.join(DATA_DIR))?;
        let config = Config::default();
        config.save(&dir.join(CONFIG_FILE))?;

        info!("event=workspace_init path={}", dir.display());
        Ok(Self { root, config })
    }

    /// Open the workspace rooted exactly at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = path.as_ref().to_path_buf();
        let dir = root.join(WORKSPACE_DIR);

        if !dir.is_dir() {
            return Err(StoreError::WorkspaceNotFound(root.display().to_string()));
        }

        let config = Config::load(&dir.join(CONFIG_FILE))?;
        Ok(Self { root, config })
    }

    /// Search upward from `start` for a `.taskdeck/` directory.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut current = start.as_ref().to_path_buf();
        loop {
            if current.join(WORKSPACE_DIR).is_dir() {
                return Self::open(&current);
            }
            if !current.pop() {
                return Err(StoreError::WorkspaceNotFound(
                    start.as_ref().display().to_string(),
                ));
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir().join(DATA_DIR)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn backend(&self) -> FileBackend {
        FileBackend::new(self.data_dir())
    }

    /// Load the store backed by this workspace's data directory.
    pub fn open_store(&self) -> Result<TaskStore<FileBackend>, StoreError> {
        TaskStore::open(self.backend())
    }
}
