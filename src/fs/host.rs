// Thu Jan 16 2026 - Alex

use super::traits::PermissionAdapter;
use crate::permission::{NativePermissions, PermissionError};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// The filesystem of the running host, through `std::fs`.
///
/// Symlinks are followed on both read and write.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFilesystem;

impl HostFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl PermissionAdapter for HostFilesystem {
    fn supports_posix_permissions(&self) -> bool {
        cfg!(unix)
    }

    #[cfg(unix)]
    fn read_permission_flags(&self, target: &Path) -> Result<NativePermissions, PermissionError> {
        let metadata = std::fs::metadata(target).map_err(|e| PermissionError::io(target, e))?;
        Ok(NativePermissions::from_mode(metadata.permissions().mode()))
    }

    #[cfg(not(unix))]
    fn read_permission_flags(&self, _target: &Path) -> Result<NativePermissions, PermissionError> {
        Err(PermissionError::Unsupported)
    }

    #[cfg(unix)]
    fn write_permission_flags(&self, target: &Path, flags: NativePermissions) -> Result<(), PermissionError> {
        let permissions = std::fs::Permissions::from_mode(flags.mode());
        std::fs::set_permissions(target, permissions).map_err(|e| PermissionError::io(target, e))?;
        log::debug!("Wrote mode {:04o} to {}", flags.mode(), target.display());
        Ok(())
    }

    #[cfg(not(unix))]
    fn write_permission_flags(&self, _target: &Path, _flags: NativePermissions) -> Result<(), PermissionError> {
        Err(PermissionError::Unsupported)
    }
}
