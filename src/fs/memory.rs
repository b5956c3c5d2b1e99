// Thu Jan 16 2026 - Alex

use super::traits::PermissionAdapter;
use crate::permission::{NativePermissions, PermissionError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Path to mode table standing in for a real filesystem.
#[derive(Debug, Default)]
pub struct InMemoryFilesystem {
    modes: Mutex<HashMap<PathBuf, u32>>,
    writes: Mutex<usize>,
    posix: bool,
    fail_writes: bool,
}

impl InMemoryFilesystem {
    pub fn new() -> Self {
        Self {
            posix: true,
            ..Self::default()
        }
    }

    pub fn with_file(self, path: impl Into<PathBuf>, mode: u32) -> Self {
        self.modes.lock().insert(path.into(), mode);
        self
    }

    pub fn unsupported(mut self) -> Self {
        self.posix = false;
        self
    }

    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn mode_of(&self, path: &Path) -> Option<u32> {
        self.modes.lock().get(path).copied()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }
}

impl PermissionAdapter for InMemoryFilesystem {
    fn supports_posix_permissions(&self) -> bool {
        self.posix
    }

    fn read_permission_flags(&self, target: &Path) -> Result<NativePermissions, PermissionError> {
        self.mode_of(target)
            .map(NativePermissions::from_mode)
            .ok_or_else(|| PermissionError::io(target, io::Error::from(io::ErrorKind::NotFound)))
    }

    fn write_permission_flags(&self, target: &Path, flags: NativePermissions) -> Result<(), PermissionError> {
        if self.fail_writes {
            return Err(PermissionError::io(
                target,
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }

        let mut modes = self.modes.lock();
        let mode = modes
            .get_mut(target)
            .ok_or_else(|| PermissionError::io(target, io::Error::from(io::ErrorKind::NotFound)))?;
        *mode = flags.mode();
        *self.writes.lock() += 1;
        Ok(())
    }
}
