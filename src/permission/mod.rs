// Thu Jan 16 2026 - Alex

pub mod access;
pub mod error;
pub mod native;
pub mod selector;
pub mod set;

pub use access::AccessRights;
pub use error::PermissionError;
pub use native::NativePermissions;
pub use selector::{Class, GroupSelector};
pub use set::{pack_access, PermissionSet, SyncOutcome};
