// Thu Jan 16 2026 - Alex

use crate::permission::{NativePermissions, PermissionError};
use std::path::Path;

/// Access to a filesystem's native permission metadata.
pub trait PermissionAdapter: Send + Sync {
    fn supports_posix_permissions(&self) -> bool;
    fn read_permission_flags(&self, target: &Path) -> Result<NativePermissions, PermissionError>;
    /// Replaces the target's permission flags with `flags`.
    fn write_permission_flags(&self, target: &Path, flags: NativePermissions) -> Result<(), PermissionError>;
}
