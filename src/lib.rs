// Thu Jan 16 2026 - Alex

pub mod config;
pub mod fs;
pub mod permission;
pub mod ui;

pub use config::Config;
pub use fs::{HostFilesystem, InMemoryFilesystem, PermissionAdapter};
pub use permission::{
    pack_access, AccessRights, Class, GroupSelector, NativePermissions, PermissionError, PermissionSet,
    SyncOutcome,
};
