//! Access levels using bitflags.
//!
//! Exactly two bits, checked independently:
//! - `READ` (bit 0)
//! - `WRITE` (bit 1)
//!
//! `READ_WRITE` is not a separate privilege, only the union of the two.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use super::error::{PermissionError, Result};

bitflags! {
    /// Access rights over a single resource, stored in a 2-bit field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct AccessLevel: u8 {
        /// Permission to read the resource
        const READ       = 1 << 0;
        /// Permission to create or modify the resource
        const WRITE      = 1 << 1;
        /// Both read and write
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

impl AccessLevel {
    /// No access. Checking for it always succeeds.
    pub const NONE: Self = Self::empty();

    /// Width of one resource field in a packed permission value.
    pub const FIELD_BITS: u32 = 2;

    /// Mask covering a single field.
    pub const FIELD_MASK: u32 = (1 << Self::FIELD_BITS) - 1;

    /// Extracts an access level from the low bits of a packed field.
    ///
    /// Bits above the field width are discarded.
    #[must_use]
    pub const fn from_field(field: u32) -> Self {
        Self::from_bits_truncate((field & Self::FIELD_MASK) as u8)
    }

    /// Returns the stable name of the access level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self.bits() {
            0 => "none",
            1 => "read",
            2 => "write",
            _ => "read_write",
        }
    }

    /// Returns all four levels in numeric order.
    #[must_use]
    pub const fn variants() -> [Self; 4] {
        [Self::NONE, Self::READ, Self::WRITE, Self::READ_WRITE]
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(Self::NONE),
            "read" | "r" => Ok(Self::READ),
            "write" | "w" => Ok(Self::WRITE),
            "read_write" | "readwrite" | "rw" => Ok(Self::READ_WRITE),
            _ => Err(PermissionError::UnknownAccess(s.to_string())),
        }
    }
}
