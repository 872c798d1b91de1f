//! Protected resource categories.
//!
//! Each resource owns one 2-bit field in a [`PermissionSet`](super::PermissionSet),
//! at the bit offset `2 * slot`. Slots are written out explicitly and are part
//! of the wire format: never renumber a variant, only append new ones at the
//! next unused slot.

use std::fmt;
use std::str::FromStr;

use super::error::{PermissionError, Result};

/// A protected entity category of the upstream API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Resource {
    /// Wildcard: access granted here applies to every resource
    All = 0,
    /// Account balance
    Balance = 1,
    /// Charges
    Charges = 2,
    /// Customers
    Customers = 3,
    /// Disputes
    Disputes = 4,
    /// Events
    Events = 5,
    /// File uploads
    FileUploads = 6,
    /// Refunds
    Refunds = 7,
    /// Tokens
    Tokens = 8,
    /// Transfers
    Transfers = 9,
    /// Transfer reversals
    TransferReversals = 10,
}

impl Resource {
    /// Returns the numeric slot of this resource.
    ///
    /// The field for the resource starts at bit `2 * slot`.
    #[must_use]
    pub const fn slot(self) -> u32 {
        self as u32
    }

    /// Looks up a resource by its numeric slot.
    #[must_use]
    pub const fn from_slot(slot: u8) -> Option<Self> {
        match slot {
            0 => Some(Self::All),
            1 => Some(Self::Balance),
            2 => Some(Self::Charges),
            3 => Some(Self::Customers),
            4 => Some(Self::Disputes),
            5 => Some(Self::Events),
            6 => Some(Self::FileUploads),
            7 => Some(Self::Refunds),
            8 => Some(Self::Tokens),
            9 => Some(Self::Transfers),
            10 => Some(Self::TransferReversals),
            _ => None,
        }
    }

    /// Returns the stable snake_case name of the resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripe_proxy::Resource;
    ///
    /// assert_eq!(Resource::FileUploads.as_str(), "file_uploads");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Balance => "balance",
            Self::Charges => "charges",
            Self::Customers => "customers",
            Self::Disputes => "disputes",
            Self::Events => "events",
            Self::FileUploads => "file_uploads",
            Self::Refunds => "refunds",
            Self::Tokens => "tokens",
            Self::Transfers => "transfers",
            Self::TransferReversals => "transfer_reversals",
        }
    }

    /// Returns every resource, wildcard first, in slot order.
    #[must_use]
    pub const fn variants() -> &'static [Self] {
        &[
            Self::All,
            Self::Balance,
            Self::Charges,
            Self::Customers,
            Self::Disputes,
            Self::Events,
            Self::FileUploads,
            Self::Refunds,
            Self::Tokens,
            Self::Transfers,
            Self::TransferReversals,
        ]
    }

    /// Whether this is the wildcard resource.
    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = PermissionError;

    /// Parses a resource name.
    ///
    /// Case-insensitive; `-` is accepted in place of `_` and `*` means `all`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        if normalized == "*" {
            return Ok(Self::All);
        }
        Self::variants()
            .iter()
            .copied()
            .find(|resource| resource.as_str() == normalized)
            .ok_or_else(|| PermissionError::UnknownResource(s.to_string()))
    }
}

impl TryFrom<u8> for Resource {
    type Error = PermissionError;

    fn try_from(slot: u8) -> Result<Self> {
        Self::from_slot(slot).ok_or_else(|| PermissionError::UnknownResource(slot.to_string()))
    }
}

impl From<Resource> for u8 {
    fn from(resource: Resource) -> Self {
        resource as Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Slot Tests ===

    #[test]
    fn test_slots_are_frozen() {
        assert_eq!(Resource::All.slot(), 0);
        assert_eq!(Resource::Balance.slot(), 1);
        assert_eq!(Resource::Charges.slot(), 2);
        assert_eq!(Resource::Customers.slot(), 3);
        assert_eq!(Resource::Disputes.slot(), 4);
        assert_eq!(Resource::Events.slot(), 5);
        assert_eq!(Resource::FileUploads.slot(), 6);
        assert_eq!(Resource::Refunds.slot(), 7);
        assert_eq!(Resource::Tokens.slot(), 8);
        assert_eq!(Resource::Transfers.slot(), 9);
        assert_eq!(Resource::TransferReversals.slot(), 10);
    }

    #[test]
    fn test_variants_are_in_slot_order() {
        for (i, resource) in Resource::variants().iter().enumerate() {
            assert_eq!(resource.slot() as usize, i, "{resource:?} is out of order");
        }
    }

    #[test]
    fn test_from_slot_matches_variants() {
        for resource in Resource::variants() {
            assert_eq!(Resource::from_slot(u8::from(*resource)), Some(*resource));
        }
        assert_eq!(Resource::from_slot(11), None);
        assert_eq!(Resource::from_slot(u8::MAX), None);
    }

    #[test]
    fn test_try_from_unknown_slot() {
        assert_eq!(
            Resource::try_from(15),
            Err(PermissionError::UnknownResource("15".into()))
        );
        assert_eq!(Resource::try_from(3), Ok(Resource::Customers));
    }

    #[test]
    fn test_only_all_is_wildcard() {
        let wildcards: Vec<_> = Resource::variants()
            .iter()
            .filter(|r| r.is_wildcard())
            .collect();
        assert_eq!(wildcards, vec![&Resource::All]);
    }

    // === Name Tests ===

    #[test]
    fn test_names_are_unique_snake_case() {
        let names: Vec<&str> = Resource::variants().iter().map(|r| r.as_str()).collect();
        for name in &names {
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "Resource name '{name}' should be snake_case"
            );
        }
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len(), "Duplicate resource name found");
    }

    #[test]
    fn test_parse_every_name() {
        for resource in Resource::variants() {
            assert_eq!(resource.as_str().parse::<Resource>(), Ok(*resource));
        }
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!("CHARGES".parse::<Resource>(), Ok(Resource::Charges));
        assert_eq!(" file-uploads ".parse::<Resource>(), Ok(Resource::FileUploads));
        assert_eq!("*".parse::<Resource>(), Ok(Resource::All));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "payouts".parse::<Resource>(),
            Err(PermissionError::UnknownResource("payouts".into()))
        );
    }

    #[test]
    fn test_display_uses_name() {
        assert_eq!(Resource::TransferReversals.to_string(), "transfer_reversals");
    }

    // === Serde Tests ===

    #[test]
    fn test_serialize_as_snake_case() {
        let json = serde_json::to_string(&Resource::FileUploads).unwrap();
        assert_eq!(json, "\"file_uploads\"");
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for resource in Resource::variants() {
            let json = serde_json::to_string(resource).unwrap();
            assert_eq!(json, format!("\"{}\"", resource.as_str()));
            let restored: Resource = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, *resource);
        }
    }
}
