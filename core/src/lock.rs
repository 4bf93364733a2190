//! Serializes runs against the same target directory.
//!
//! The guard is an advisory lock held on an open lock file, so the kernel releases it when the
//! owning process dies. A lock file left behind by a killed run never blocks the next one.

use std::fs::{File, OpenOptions, TryLockError};
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use subsweep_common::error::LockError;
use tracing::debug;

/// Exclusive ownership of a target directory, released on drop.
#[derive(Debug)]
pub struct TargetLock {
    path: PathBuf,
    file: File,
}

impl TargetLock {
    /// Locks the lock file, creating it if needed. Fails if another run holds it.
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self, LockError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let io_error = |reason| LockError::Io {
            path: path.clone(),
            reason,
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(io_error)?;
        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => return Err(LockError::Held { path: path.clone() }),
            Err(TryLockError::Error(reason)) => return Err(io_error(reason)),
        }

        // pid only helps an operator see who holds the lock
        if let Err(e) = record_pid(&mut file) {
            debug!("Cannot record pid in lock {}: {e}", path.display());
        }
        Ok(Self { path, file })
    }
}

fn record_pid(file: &mut File) -> std::io::Result<()> {
    file.set_len(0)?;
    file.rewind()?;
    writeln!(file, "{}", std::process::id())
}

impl Drop for TargetLock {
    fn drop(&mut self) {
        // the file stays in place; unlinking it would race a run that already opened it
        if let Err(e) = self.file.unlock() {
            debug!("Cannot unlock {}: {e}", self.path.display());
        }
    }
}
