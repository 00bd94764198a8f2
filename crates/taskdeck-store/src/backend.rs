//! Persistence adapter: three JSON collections under fixed keys.
//!
//! A backend only moves text in and out. `load_all` and `save_all` turn that
//! text into a [`Snapshot`] and back. Every save rewrites all three
//! collections, tasks first. Deletes cascade from projects and categories
//! into tasks, so a save cut short after the tasks write leaves at worst an
//! unused project or category, never a task pointing at a missing one.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use taskdeck_core::model::{CategorySet, Project, ProjectStats, Task};

use crate::atomic::write_atomic;
use crate::error::StoreError;

pub const TASKS_KEY: &str = "tasks";
pub const PROJECTS_KEY: &str = "projects";
pub const CATEGORIES_KEY: &str = "categories";

/// Durable key-value text storage.
pub trait Backend {
    /// `Ok(None)` when nothing has been stored under `key` yet.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per collection inside `dir`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Backend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        write_atomic(self.path(key), value.as_bytes())
    }
}

/// In-process storage, used when embedding the store and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of `write` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// The three collections as loaded from or written to a backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub categories: CategorySet,
}

/// Stored project layout: the project plus counters derived at save time.
#[derive(Serialize)]
struct ProjectRecord<'a> {
    #[serde(flatten)]
    project: &'a Project,
    #[serde(flatten)]
    stats: ProjectStats,
}

pub fn load_all<B: Backend + ?Sized>(backend: &B) -> Result<Snapshot, StoreError> {
    let snapshot = Snapshot {
        tasks: load_key(backend, TASKS_KEY)?,
        projects: load_key(backend, PROJECTS_KEY)?,
        categories: load_key(backend, CATEGORIES_KEY)?,
    };
    debug!(
        "event=load tasks={} projects={} categories={}",
        snapshot.tasks.len(),
        snapshot.projects.len(),
        snapshot.categories.len()
    );
    Ok(snapshot)
}

pub fn save_all<B: Backend + ?Sized>(
    backend: &mut B,
    tasks: &[Task],
    projects: &[Project],
    categories: &CategorySet,
) -> Result<(), StoreError> {
    let records: Vec<ProjectRecord<'_>> = projects
        .iter()
        .map(|project| ProjectRecord {
            project,
            stats: ProjectStats::tally(&project.id, tasks),
        })
        .collect();

    backend.write(TASKS_KEY, &serde_json::to_string_pretty(tasks)?)?;
    backend.write(PROJECTS_KEY, &serde_json::to_string_pretty(&records)?)?;
    backend.write(CATEGORIES_KEY, &serde_json::to_string_pretty(categories)?)?;
    debug!(
        "event=save tasks={} projects={} categories={}",
        tasks.len(),
        projects.len(),
        categories.len()
    );
    Ok(())
}

fn load_key<T, B>(backend: &B, key: &str) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
    B: Backend + ?Sized,
{
    let Some(text) = backend.read(key)? else {
        return Ok(T::default());
    };
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(T::default());
    }
    serde_json::from_str(trimmed).map_err(|source| {
        warn!("event=load_corrupt key={} error={}", key, source);
        StoreError::Corrupt {
            key: key.to_string(),
            source,
        }
    })
}
