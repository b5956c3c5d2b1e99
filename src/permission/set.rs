// Thu Jan 16 2026 - Alex

use super::access::AccessRights;
use super::error::PermissionError;
use super::native::{NativePermissions, FLAG_TABLE};
use super::selector::{Class, GroupSelector};
use crate::config::Config;
use crate::fs::PermissionAdapter;
use log::{debug, error, warn};
use std::fmt;
use std::path::Path;

const TRIAD_MASK: u32 = 0x7;

/// Packs three triads as `(owner << 6) | (group << 3) | others`.
pub fn pack_access(owner: u32, group: u32, others: u32) -> Result<u32, PermissionError> {
    let owner = AccessRights::from_raw(owner)?;
    let group = AccessRights::from_raw(group)?;
    let others = AccessRights::from_raw(others)?;
    Ok(pack_rights(owner, group, others))
}

fn pack_rights(owner: AccessRights, group: AccessRights, others: AccessRights) -> u32 {
    (owner.bits() << 6) | (group.bits() << 3) | others.bits()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Applied(NativePermissions),
    /// The filesystem has no POSIX permission metadata; nothing was written.
    Unsupported,
}

impl SyncOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Desired permission state for one target, packed into nine bits.
///
/// The set borrows its target and never touches the filesystem until
/// [`PermissionSet::synchronize`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet<'a> {
    access: u32,
    target: &'a Path,
}

impl<'a> PermissionSet<'a> {
    pub fn new(target: &'a Path) -> Self {
        Self { access: 0, target }
    }

    /// Only the nine permission bits of `mode` are kept.
    pub fn from_mode(target: &'a Path, mode: u32) -> Self {
        Self {
            access: mode & NativePermissions::PERMISSION_BITS.bits(),
            target,
        }
    }

    pub fn load<A: PermissionAdapter + ?Sized>(target: &'a Path, adapter: &A) -> Result<Self, PermissionError> {
        let flags = adapter.read_permission_flags(target)?;
        let set = Self::from_mode(target, flags.mode());
        debug!("Loaded {} from {}", set.octal(), target.display());
        Ok(set)
    }

    pub fn target(&self) -> &'a Path {
        self.target
    }

    pub fn access(&self) -> u32 {
        self.access
    }

    pub fn owner_access(&self) -> u32 {
        self.field(Class::Owner)
    }

    pub fn group_access(&self) -> u32 {
        self.field(Class::Group)
    }

    pub fn others_access(&self) -> u32 {
        self.field(Class::Others)
    }

    pub fn rights_for(&self, class: Class) -> AccessRights {
        AccessRights::from_bits_truncate(self.field(class))
    }

    fn field(&self, class: Class) -> u32 {
        (self.access >> class.shift()) & TRIAD_MASK
    }

    /// Overwrites the triad of every class in `selector` with `value`.
    /// Unselected classes keep their current rights.
    pub fn set_access(&mut self, selector: GroupSelector, value: AccessRights) {
        let [owner, group, others] = Class::ALL.map(|class| {
            if selector.selects(class) {
                value
            } else {
                self.rights_for(class)
            }
        });

        self.access = pack_rights(owner, group, others);
        debug!("set {:?} to {} -> {:03o}", selector, value, self.access);
    }

    /// Raw-integer form of [`set_access`](Self::set_access). Both arguments are
    /// validated before anything is modified.
    pub fn set_raw_access(&mut self, selector: u32, value: u32) -> Result<(), PermissionError> {
        let selector = GroupSelector::from_raw(selector)?;
        let value = AccessRights::from_raw(value)?;
        self.set_access(selector, value);
        Ok(())
    }

    pub fn pack(&mut self, owner: u32, group: u32, others: u32) -> Result<(), PermissionError> {
        self.access = pack_access(owner, group, others)?;
        Ok(())
    }

    pub fn reset_access(&mut self) {
        self.access = 0;
    }

    /// The nine native flags this set describes.
    pub fn to_native(&self) -> NativePermissions {
        self.apply_to(NativePermissions::empty())
    }

    fn apply_to(&self, mut flags: NativePermissions) -> NativePermissions {
        for (class, right, native) in FLAG_TABLE {
            flags.set(native, self.rights_for(class).contains(right));
        }
        flags
    }

    pub fn synchronize<A: PermissionAdapter + ?Sized>(&self, adapter: &A) -> Result<SyncOutcome, PermissionError> {
        self.synchronize_with(adapter, &Config::default())
    }

    /// Replaces the target's nine permission flags with this set's state.
    ///
    /// Set-uid, set-gid and sticky bits are cleared unless
    /// `config.preserve_special_bits` is set.
    ///
    /// The host write is a single mode update but the filesystem gives no
    /// guarantee about the on-disk state if it fails; nothing is rolled back
    /// and the in-memory value is never modified.
    pub fn synchronize_with<A: PermissionAdapter + ?Sized>(
        &self,
        adapter: &A,
        config: &Config,
    ) -> Result<SyncOutcome, PermissionError> {
        if !adapter.supports_posix_permissions() {
            warn!(
                "Filesystem does not support POSIX permissions, skipping {}",
                self.target.display()
            );
            return Ok(SyncOutcome::Unsupported);
        }

        let current = adapter.read_permission_flags(self.target)?;
        let mut flags = self.apply_to(current);
        if !config.preserve_special_bits {
            flags.remove(NativePermissions::SPECIAL_BITS);
        }

        debug!(
            "Synchronizing {}: {} -> {}",
            self.target.display(),
            current,
            flags
        );

        if let Err(e) = adapter.write_permission_flags(self.target, flags) {
            error!("Failed to write permissions: {}", e);
            return Err(e);
        }

        Ok(SyncOutcome::Applied(flags))
    }

    pub fn octal(&self) -> String {
        format!("{:03o}", self.access)
    }

    pub fn symbolic(&self) -> String {
        Class::ALL
            .iter()
            .map(|class| self.rights_for(*class).to_string())
            .collect()
    }
}

/// `<name>: <owner><group><others> <binary>`
impl fmt::Display for PermissionSet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| self.target.to_string_lossy());

        write!(
            f,
            "{}: {}{}{} {:b}",
            name,
            self.owner_access(),
            self.group_access(),
            self.others_access(),
            self.access
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFilesystem;

    fn target() -> &'static Path {
        Path::new("/tmp/test.sh")
    }

    #[test]
    fn test_new_set_is_empty() {
        let set = PermissionSet::new(target());
        assert_eq!(set.access(), 0);
        assert_eq!(set.target(), target());
    }

    #[test]
    fn test_pack_round_trip() {
        let mut set = PermissionSet::new(target());
        for owner in 0..8 {
            for group in 0..8 {
                for others in 0..8 {
                    set.pack(owner, group, others).unwrap();
                    assert_eq!(set.owner_access(), owner);
                    assert_eq!(set.group_access(), group);
                    assert_eq!(set.others_access(), others);
                    assert!(set.access() <= 0o777);
                }
            }
        }
    }

    #[test]
    fn test_pack_rejects_out_of_range() {
        let mut set = PermissionSet::new(target());
        set.pack(7, 5, 5).unwrap();

        assert!(matches!(
            set.pack(8, 0, 0),
            Err(PermissionError::InvalidArgument { name: "access", value: 8 })
        ));
        assert_eq!(set.access(), 0o755);
        assert!(pack_access(0, 0, 9).is_err());
    }

    #[test]
    fn test_selective_update() {
        let mut set = PermissionSet::new(target());
        set.pack(3, 5, 6).unwrap();

        set.set_access(GroupSelector::OWNER, AccessRights::READ);
        assert_eq!(set.owner_access(), 4);
        assert_eq!(set.group_access(), 5);
        assert_eq!(set.others_access(), 6);

        set.set_access(GroupSelector::GROUP, AccessRights::NONE);
        assert_eq!(set.owner_access(), 4);
        assert_eq!(set.group_access(), 0);
        assert_eq!(set.others_access(), 6);
    }

    #[test]
    fn test_union_update() {
        let mut set = PermissionSet::new(target());
        set.pack(1, 2, 3).unwrap();

        set.set_access(GroupSelector::OWNER | GroupSelector::OTHERS, AccessRights::READ);
        assert_eq!(set.owner_access(), 4);
        assert_eq!(set.group_access(), 2);
        assert_eq!(set.others_access(), 4);
    }

    #[test]
    fn test_empty_selector_is_noop() {
        let mut set = PermissionSet::new(target());
        set.pack(6, 4, 4).unwrap();
        set.set_access(GroupSelector::NONE, AccessRights::ALL);
        assert_eq!(set.access(), 0o644);
    }

    #[test]
    fn test_set_raw_access_validates() {
        let mut set = PermissionSet::new(target());
        set.set_raw_access(7, 5).unwrap();
        assert_eq!(set.access(), 0o555);

        assert!(matches!(
            set.set_raw_access(1, 8),
            Err(PermissionError::InvalidArgument { name: "access", value: 8 })
        ));
        assert!(matches!(
            set.set_raw_access(16, 1),
            Err(PermissionError::InvalidArgument { name: "selector", value: 16 })
        ));
        assert_eq!(set.access(), 0o555);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut set = PermissionSet::new(target());
        set.set_access(GroupSelector::ALL, AccessRights::ALL);
        set.reset_access();
        assert_eq!(set.access(), 0);
        set.reset_access();
        assert_eq!(set.access(), 0);
    }

    #[test]
    fn test_walkthrough_scenario() {
        let mut set = PermissionSet::new(target());

        set.set_access(GroupSelector::ALL, AccessRights::ALL);
        assert_eq!(set.access(), 511);
        assert_eq!(set.to_string(), "test.sh: 777 111111111");

        set.set_access(GroupSelector::OWNER | GroupSelector::OTHERS, AccessRights::READ);
        assert_eq!(set.access(), 316);
        assert_eq!(set.to_string(), "test.sh: 474 100111100");

        set.reset_access();
        set.set_access(
            GroupSelector::OWNER | GroupSelector::OTHERS,
            AccessRights::READ | AccessRights::WRITE,
        );
        assert_eq!(set.access(), 390);
        assert_eq!(set.to_string(), "test.sh: 606 110000110");

        set.set_access(GroupSelector::ALL, AccessRights::NONE);
        assert_eq!(set.access(), 0);
        assert_eq!(set.to_string(), "test.sh: 000 0");
    }

    #[test]
    fn test_symbolic_and_octal() {
        let set = PermissionSet::from_mode(target(), 0o100754);
        assert_eq!(set.symbolic(), "rwxr-xr--");
        assert_eq!(set.octal(), "754");
        assert_eq!(PermissionSet::new(target()).octal(), "000");
    }

    #[test]
    fn test_display_without_file_name() {
        let set = PermissionSet::new(Path::new("/"));
        assert_eq!(set.to_string(), "/: 000 0");
    }

    #[test]
    fn test_synchronize_all_and_none() {
        let fs = InMemoryFilesystem::new().with_file(target(), 0o640);
        let mut set = PermissionSet::new(target());

        set.set_access(GroupSelector::ALL, AccessRights::ALL);
        let outcome = set.synchronize(&fs).unwrap();
        assert_eq!(outcome, SyncOutcome::Applied(NativePermissions::PERMISSION_BITS));
        assert_eq!(fs.mode_of(target()), Some(0o777));

        set.set_access(GroupSelector::ALL, AccessRights::NONE);
        set.synchronize(&fs).unwrap();
        assert_eq!(fs.mode_of(target()), Some(0));
    }

    #[test]
    fn test_synchronize_is_idempotent() {
        let fs = InMemoryFilesystem::new().with_file(target(), 0o600);
        let mut set = PermissionSet::new(target());
        set.pack(7, 5, 0).unwrap();

        let first = set.synchronize(&fs).unwrap();
        let second = set.synchronize(&fs).unwrap();
        assert_eq!(first, second);
        assert_eq!(fs.mode_of(target()), Some(0o750));
        assert_eq!(fs.write_count(), 2);
    }

    #[test]
    fn test_synchronize_special_bits() {
        let fs = InMemoryFilesystem::new().with_file(target(), 0o4755);
        let mut set = PermissionSet::new(target());
        set.pack(7, 0, 0).unwrap();

        let config = Config::default().with_preserve_special_bits(true);
        set.synchronize_with(&fs, &config).unwrap();
        assert_eq!(fs.mode_of(target()), Some(0o4700));

        set.synchronize(&fs).unwrap();
        assert_eq!(fs.mode_of(target()), Some(0o700));
    }

    #[test]
    fn test_synchronize_writes_exactly_in_memory_state() {
        let fs = InMemoryFilesystem::new().with_file(target(), 0o7755);
        let mut set = PermissionSet::new(target());
        set.set_access(GroupSelector::OWNER, AccessRights::READ | AccessRights::WRITE);
        set.set_access(GroupSelector::GROUP | GroupSelector::OTHERS, AccessRights::READ);

        let outcome = set.synchronize(&fs).unwrap();
        assert_eq!(outcome, SyncOutcome::Applied(set.to_native()));
        assert_eq!(fs.mode_of(target()), Some(0o644));
    }

    #[test]
    fn test_synchronize_unsupported() {
        let fs = InMemoryFilesystem::new().with_file(target(), 0o644).unsupported();
        let mut set = PermissionSet::new(target());
        set.set_access(GroupSelector::ALL, AccessRights::ALL);

        assert_eq!(set.synchronize(&fs).unwrap(), SyncOutcome::Unsupported);
        assert_eq!(fs.mode_of(target()), Some(0o644));
        assert_eq!(fs.write_count(), 0);
    }

    #[test]
    fn test_synchronize_failure_keeps_state() {
        let fs = InMemoryFilesystem::new().with_file(target(), 0o644).failing_writes();
        let mut set = PermissionSet::new(target());
        set.pack(7, 0, 0).unwrap();

        let err = set.synchronize(&fs).unwrap_err();
        assert!(matches!(err, PermissionError::Io { .. }));
        assert_eq!(set.access(), 0o700);
        assert_eq!(fs.mode_of(target()), Some(0o644));
    }

    #[test]
    fn test_synchronize_missing_target() {
        let fs = InMemoryFilesystem::new();
        let set = PermissionSet::new(target());

        let err = set.synchronize(&fs).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load() {
        let fs = InMemoryFilesystem::new().with_file(target(), 0o2751);
        let set = PermissionSet::load(target(), &fs).unwrap();
        assert_eq!(set.access(), 0o751);
        assert_eq!(set.to_native(), NativePermissions::from_mode(0o751));
    }
}
