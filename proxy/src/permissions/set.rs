//! Packed per-resource permissions.
//!
//! A [`PermissionSet`] is a single `u32` read as sixteen 2-bit fields. The
//! field for a resource with slot `r` occupies bits `2r` and `2r + 1` and holds
//! that resource's [`AccessLevel`]. Slot 0 is the [`Resource::All`] wildcard.
//!
//! ```text
//!  bit 31                                                     bit 0
//!  ┌──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┬──┐
//!  │15│14│13│12│11│10│ 9│ 8│ 7│ 6│ 5│ 4│ 3│ 2│ 1│ 0│  slot
//!  └──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┴──┘
//!   each field: bit 0 = READ, bit 1 = WRITE
//! ```
//!
//! On the wire the value is exactly four bytes, big-endian.

use std::fmt;
use std::str::FromStr;

use super::access::AccessLevel;
use super::error::{PermissionError, Result};
use super::resource::Resource;

/// Access rights for every resource, packed into 32 bits.
///
/// Two sets with the same raw value are the same set. Granting only ever adds
/// bits; to narrow a set, build a new one from a raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    encoded: u32,
}

// Every resource slot must have a field inside the 32-bit value.
const _: () = {
    let resources = Resource::variants();
    let mut i = 0;
    while i < resources.len() {
        assert!(
            resources[i].slot() < PermissionSet::CAPACITY,
            "resource slot does not fit in a 32-bit permission set"
        );
        i += 1;
    }
};

impl PermissionSet {
    /// Size of the wire form in bytes.
    pub const WIRE_LEN: usize = 4;

    /// Number of resource fields the layout can hold, wildcard included.
    pub const CAPACITY: u32 = u32::BITS / AccessLevel::FIELD_BITS;

    // === Construction ===

    /// Wraps a raw packed value as-is.
    ///
    /// Fields for slots with no defined resource are kept but never consulted.
    #[must_use]
    pub const fn from_raw(value: u32) -> Self {
        Self { encoded: value }
    }

    /// The "no access anywhere" set.
    #[must_use]
    pub const fn none() -> Self {
        Self::from_raw(0)
    }

    /// Returns the raw packed value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.encoded
    }

    /// Whether no bit is set, in any slot.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.encoded == 0
    }

    // === Wire Format ===

    /// Serializes to the 4-byte big-endian wire form.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripe_proxy::PermissionSet;
    ///
    /// let perms = PermissionSet::from_raw(0x01020304);
    /// assert_eq!(perms.encode(), [0x01, 0x02, 0x03, 0x04]);
    /// ```
    #[must_use]
    pub const fn encode(self) -> [u8; Self::WIRE_LEN] {
        self.encoded.to_be_bytes()
    }

    /// Parses the 4-byte big-endian wire form.
    ///
    /// The input must be exactly [`Self::WIRE_LEN`] bytes; nothing is padded or
    /// truncated. Field contents are not validated.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::WIRE_LEN] = data.try_into().map_err(|_| {
            tracing::debug!(
                actual = data.len(),
                expected = Self::WIRE_LEN,
                "Rejected permission blob with invalid length"
            );
            PermissionError::InvalidLength {
                expected: Self::WIRE_LEN,
                actual: data.len(),
            }
        })?;
        Ok(Self::from_raw(u32::from_be_bytes(bytes)))
    }

    // === Bit Addressing ===

    /// Places `access` in the field belonging to `resource`.
    ///
    /// Computes `access << (slot * 2)`. Both the check and the grant go through
    /// this, so masks built anywhere for the same pair are identical.
    #[must_use]
    pub const fn resource_mask(resource: Resource, access: AccessLevel) -> u32 {
        (access.bits() as u32) << (resource.slot() * AccessLevel::FIELD_BITS)
    }

    /// Returns the access stored in `resource`'s own field.
    ///
    /// The wildcard field is not consulted; use [`Self::can`] for authorization.
    #[must_use]
    pub const fn access(self, resource: Resource) -> AccessLevel {
        AccessLevel::from_field(self.encoded >> (resource.slot() * AccessLevel::FIELD_BITS))
    }

    // === Permission Checking ===

    /// Checks whether `access` is permitted on `resource`.
    ///
    /// Succeeds when every bit of `access` is set in the resource's field, or
    /// every bit of `access` is set in the wildcard field. A field holding only
    /// `READ` does not satisfy a `READ_WRITE` request.
    ///
    /// Asking for [`AccessLevel::NONE`] always succeeds, whatever the set holds.
    /// Callers must not use `NONE` as a meaningful query.
    ///
    /// # Examples
    ///
    /// ```
    /// use stripe_proxy::{AccessLevel, PermissionSet, Resource};
    ///
    /// let mut perms = PermissionSet::none();
    /// perms.set_access(AccessLevel::READ, [Resource::All]);
    /// assert!(perms.can(AccessLevel::READ, Resource::Customers));
    /// assert!(!perms.can(AccessLevel::WRITE, Resource::Customers));
    /// ```
    #[must_use]
    pub fn can(self, access: AccessLevel, resource: Resource) -> bool {
        let mask = Self::resource_mask(resource, access);
        let all_mask = Self::resource_mask(Resource::All, access);
        let allowed = self.encoded & mask == mask || self.encoded & all_mask == all_mask;

        if !allowed {
            tracing::trace!(
                %resource,
                %access,
                permissions = self.encoded,
                "Access denied"
            );
        }

        allowed
    }

    // === Mutation ===

    /// Grants `access` on each of `resources`.
    ///
    /// Only ever adds bits. Granting something already held is a no-op.
    pub fn set_access<I>(&mut self, access: AccessLevel, resources: I)
    where
        I: IntoIterator<Item = Resource>,
    {
        for resource in resources {
            self.encoded |= Self::resource_mask(resource, access);
            tracing::trace!(%resource, %access, "Granted access");
        }
    }

    /// Consuming form of [`Self::set_access`] for building sets inline.
    #[must_use]
    pub fn with_access<I>(mut self, access: AccessLevel, resources: I) -> Self
    where
        I: IntoIterator<Item = Resource>,
    {
        self.set_access(access, resources);
        self
    }

    /// Iterates over the defined resources whose own field is non-empty.
    pub fn grants(self) -> impl Iterator<Item = (Resource, AccessLevel)> {
        Resource::variants().iter().filter_map(move |&resource| {
            let access = self.access(resource);
            (!access.is_empty()).then_some((resource, access))
        })
    }
}

impl From<u32> for PermissionSet {
    fn from(value: u32) -> Self {
        Self::from_raw(value)
    }
}

impl From<PermissionSet> for u32 {
    fn from(perms: PermissionSet) -> Self {
        perms.raw()
    }
}

impl TryFrom<&[u8]> for PermissionSet {
    type Error = PermissionError;

    fn try_from(data: &[u8]) -> Result<Self> {
        Self::decode(data)
    }
}

/// Renders the grant list, e.g. `all=read,charges=read_write`.
///
/// Bits in slots without a defined resource are not shown.
impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grants = self.grants().peekable();
        if grants.peek().is_none() {
            return f.write_str("none");
        }
        for (i, (resource, access)) in grants.enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{resource}={access}")?;
        }
        Ok(())
    }
}

impl FromStr for PermissionSet {
    type Err = PermissionError;

    /// Parses a comma-separated `resource=access` list.
    ///
    /// An empty string or `none` yields the empty set.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Self::none());
        }

        let mut perms = Self::none();
        for entry in trimmed.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (resource, access) = entry
                .split_once('=')
                .ok_or_else(|| PermissionError::MalformedGrant(entry.to_string()))?;
            let resource: Resource = resource.parse()?;
            let access: AccessLevel = access.parse()?;
            perms.set_access(access, [resource]);
        }
        Ok(perms)
    }
}
