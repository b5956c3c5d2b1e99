// Thu Jan 16 2026 - Alex

use super::error::PermissionError;
use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;

bitflags! {
    /// Read/write/execute rights of a single subject class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessRights: u32 {
        const EXECUTE = 0b001;
        const WRITE = 0b010;
        const READ = 0b100;
        const ALL = Self::READ.bits() | Self::WRITE.bits() | Self::EXECUTE.bits();
    }
}

impl AccessRights {
    pub const NONE: Self = Self::empty();

    /// Checked conversion from a raw triad value.
    pub fn from_raw(value: u32) -> Result<Self, PermissionError> {
        Self::from_bits(value).ok_or(PermissionError::InvalidArgument {
            name: "access",
            value,
        })
    }

    pub fn can_read(self) -> bool {
        self.contains(Self::READ)
    }

    pub fn can_write(self) -> bool {
        self.contains(Self::WRITE)
    }

    pub fn can_execute(self) -> bool {
        self.contains(Self::EXECUTE)
    }
}

impl fmt::Display for AccessRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            if self.can_read() { 'r' } else { '-' },
            if self.can_write() { 'w' } else { '-' },
            if self.can_execute() { 'x' } else { '-' },
        )
    }
}

/// Accepts either the `rwx` form or a single octal digit.
impl FromStr for AccessRights {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.len() == 1 {
            if let Some(digit) = s.chars().next().and_then(|c| c.to_digit(8)) {
                return Self::from_raw(digit);
            }
        }

        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 3 {
            return Err(PermissionError::InvalidRights(s.to_string()));
        }

        let mut rights = Self::NONE;
        for (c, (symbol, flag)) in chars.iter().zip([('r', Self::READ), ('w', Self::WRITE), ('x', Self::EXECUTE)]) {
            match *c {
                '-' => {}
                c if c == symbol => rights |= flag,
                _ => return Err(PermissionError::InvalidRights(s.to_string())),
            }
        }

        Ok(rights)
    }
}
