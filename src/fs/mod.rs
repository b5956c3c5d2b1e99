// Thu Jan 16 2026 - Alex

pub mod host;
pub mod memory;
pub mod traits;

pub use host::HostFilesystem;
pub use memory::InMemoryFilesystem;
pub use traits::PermissionAdapter;
