use crate::error::StoreError;
use log::{debug, warn};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// A lock file untouched for this long belongs to a writer that died
/// mid-save and is taken over.
pub const STALE_LOCK_AFTER: Duration = Duration::from_secs(30);

/// Whole-file replacement through a sibling `<file>.lock`.
///
/// Bytes go to the lock file and `commit` renames it over the target. Until
/// the rename succeeds the lock file is owned by this value and removed when
/// it goes away, whether it was dropped early or `commit` failed part way.
/// A live lock held by another writer is a `LockConflict`; one older than
/// [`STALE_LOCK_AFTER`] is reclaimed.
pub struct AtomicFile {
    target: PathBuf,
    lock_path: PathBuf,
    file: fs::File,
    committed: bool,
}

impl AtomicFile {
    pub fn create(target: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::create_with(target, STALE_LOCK_AFTER)
    }

    /// Like [`AtomicFile::create`], with an explicit age after which an
    /// existing lock is considered abandoned.
    pub fn create_with(target: impl AsRef<Path>, stale_after: Duration) -> Result<Self, StoreError> {
        let target = target.as_ref().to_path_buf();
        let lock_path = lock_path_for(&target);
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = match open_lock(&lock_path) {
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !is_stale(&lock_path, stale_after) {
                    return Err(StoreError::LockConflict(lock_path.display().to_string()));
                }
                warn!("event=lock_reclaimed path={}", lock_path.display());
                remove_if_present(&lock_path)?;
                open_lock(&lock_path).map_err(|e| match e.kind() {
                    ErrorKind::AlreadyExists => {
                        StoreError::LockConflict(lock_path.display().to_string())
                    }
                    _ => StoreError::Io(e),
                })?
            }
            other => other?,
        };

        Ok(Self {
            target,
            lock_path,
            file,
            committed: false,
        })
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), StoreError> {
        self.file.write_all(data)?;
        self.file.flush()?;
        Ok(())
    }

    /// Sync and move the new contents into place. On error the target is
    /// untouched and the lock file is gone once `self` drops.
    pub fn commit(mut self) -> Result<(), StoreError> {
        self.file.sync_all()?;
        fs::rename(&self.lock_path, &self.target)?;
        self.committed = true;
        debug!("event=file_commit path={}", self.target.display());
        Ok(())
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.lock_path);
        }
    }
}

/// Write `data` to `target` in one step.
pub fn write_atomic(target: impl AsRef<Path>, data: &[u8]) -> Result<(), StoreError> {
    let mut file = AtomicFile::create(target)?;
    file.write_all(data)?;
    file.commit()
}

fn open_lock(lock_path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(lock_path)
}

/// Unreadable timestamps count as live; only a provably old lock is taken.
fn is_stale(lock_path: &Path, stale_after: Duration) -> bool {
    fs::metadata(lock_path)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age >= stale_after)
}

fn remove_if_present(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(StoreError::Io(e)),
        _ => Ok(()),
    }
}

/// `tasks.json` -> `tasks.json.lock`.
fn lock_path_for(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    target.with_file_name(name)
}
