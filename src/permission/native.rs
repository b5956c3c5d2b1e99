// Thu Jan 16 2026 - Alex

use super::access::AccessRights;
use super::selector::Class;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Permission bits as the host filesystem stores them in a file mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NativePermissions: u32 {
        const SET_UID = 0o4000;
        const SET_GID = 0o2000;
        const STICKY = 0o1000;
        const OWNER_READ = 0o400;
        const OWNER_WRITE = 0o200;
        const OWNER_EXECUTE = 0o100;
        const GROUP_READ = 0o40;
        const GROUP_WRITE = 0o20;
        const GROUP_EXECUTE = 0o10;
        const OTHERS_READ = 0o4;
        const OTHERS_WRITE = 0o2;
        const OTHERS_EXECUTE = 0o1;
    }
}

/// Every (class, right) pair with its native counterpart.
pub const FLAG_TABLE: [(Class, AccessRights, NativePermissions); 9] = [
    (Class::Owner, AccessRights::READ, NativePermissions::OWNER_READ),
    (Class::Owner, AccessRights::WRITE, NativePermissions::OWNER_WRITE),
    (Class::Owner, AccessRights::EXECUTE, NativePermissions::OWNER_EXECUTE),
    (Class::Group, AccessRights::READ, NativePermissions::GROUP_READ),
    (Class::Group, AccessRights::WRITE, NativePermissions::GROUP_WRITE),
    (Class::Group, AccessRights::EXECUTE, NativePermissions::GROUP_EXECUTE),
    (Class::Others, AccessRights::READ, NativePermissions::OTHERS_READ),
    (Class::Others, AccessRights::WRITE, NativePermissions::OTHERS_WRITE),
    (Class::Others, AccessRights::EXECUTE, NativePermissions::OTHERS_EXECUTE),
];

impl NativePermissions {
    pub const PERMISSION_BITS: Self = Self::from_bits_truncate(0o777);
    pub const SPECIAL_BITS: Self = Self::from_bits_truncate(0o7000);

    /// File type bits and anything above 0o7777 are dropped.
    pub fn from_mode(mode: u32) -> Self {
        Self::from_bits_truncate(mode)
    }

    pub fn mode(self) -> u32 {
        self.bits()
    }

    pub fn permission_bits(self) -> Self {
        self & Self::PERMISSION_BITS
    }

    pub fn special_bits(self) -> Self {
        self & Self::SPECIAL_BITS
    }

    pub fn rights_for(self, class: Class) -> AccessRights {
        FLAG_TABLE
            .iter()
            .filter(|(c, _, native)| *c == class && self.contains(*native))
            .fold(AccessRights::NONE, |rights, (_, right, _)| rights | *right)
    }

    fn triad(self, class: Class) -> [char; 3] {
        let rights = self.rights_for(class);
        let (special, set_char) = match class {
            Class::Owner => (self.contains(Self::SET_UID), 's'),
            Class::Group => (self.contains(Self::SET_GID), 's'),
            Class::Others => (self.contains(Self::STICKY), 't'),
        };

        let execute = match (special, rights.can_execute()) {
            (true, true) => set_char,
            (true, false) => set_char.to_ascii_uppercase(),
            (false, true) => 'x',
            (false, false) => '-',
        };

        [
            if rights.can_read() { 'r' } else { '-' },
            if rights.can_write() { 'w' } else { '-' },
            execute,
        ]
    }
}

/// `ls -l` style rendering, e.g. `rwsr-x--T`.
impl fmt::Display for NativePermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for class in Class::ALL {
            for c in self.triad(class) {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
