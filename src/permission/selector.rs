// Thu Jan 16 2026 - Alex

use super::error::PermissionError;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Mask choosing which triads a call affects. Never stored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct GroupSelector: u32 {
        const OWNER = 0b001;
        const GROUP = 0b010;
        const OTHERS = 0b100;
        const ALL = Self::OWNER.bits() | Self::GROUP.bits() | Self::OTHERS.bits();
    }
}

impl GroupSelector {
    pub const NONE: Self = Self::empty();

    pub fn from_raw(value: u32) -> Result<Self, PermissionError> {
        Self::from_bits(value).ok_or(PermissionError::InvalidArgument {
            name: "selector",
            value,
        })
    }

    pub fn selects(self, class: Class) -> bool {
        self.contains(class.selector())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    Owner,
    Group,
    Others,
}

impl Class {
    pub const ALL: [Class; 3] = [Class::Owner, Class::Group, Class::Others];

    /// Bit offset of this class's triad inside a packed access value.
    pub fn shift(self) -> u32 {
        match self {
            Self::Owner => 6,
            Self::Group => 3,
            Self::Others => 0,
        }
    }

    pub fn selector(self) -> GroupSelector {
        match self {
            Self::Owner => GroupSelector::OWNER,
            Self::Group => GroupSelector::GROUP,
            Self::Others => GroupSelector::OTHERS,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Group => write!(f, "group"),
            Self::Others => write!(f, "others"),
        }
    }
}
