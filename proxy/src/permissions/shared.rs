//! Lock-free permission set for concurrent grants.
//!
//! [`PermissionSet::set_access`] is a read-modify-write on a plain integer.
//! When one set is shared between threads, wrap it in a
//! [`SharedPermissionSet`] so grants become atomic `fetch_or`s and are never
//! lost.

use std::sync::atomic::{AtomicU32, Ordering};

use super::access::AccessLevel;
use super::resource::Resource;
use super::set::PermissionSet;

/// A [`PermissionSet`] that can be granted to and checked from many threads.
#[derive(Debug, Default)]
pub struct SharedPermissionSet {
    encoded: AtomicU32,
}

impl SharedPermissionSet {
    /// Creates a shared set starting from `initial`.
    #[must_use]
    pub const fn new(initial: PermissionSet) -> Self {
        Self {
            encoded: AtomicU32::new(initial.raw()),
        }
    }

    /// Returns a snapshot of the current value.
    #[must_use]
    pub fn load(&self) -> PermissionSet {
        PermissionSet::from_raw(self.encoded.load(Ordering::Acquire))
    }

    /// Checks `access` on `resource` against a single snapshot.
    #[must_use]
    pub fn can(&self, access: AccessLevel, resource: Resource) -> bool {
        self.load().can(access, resource)
    }

    /// Atomically grants `access` on each of `resources`.
    pub fn grant<I>(&self, access: AccessLevel, resources: I)
    where
        I: IntoIterator<Item = Resource>,
    {
        for resource in resources {
            self.encoded.fetch_or(
                PermissionSet::resource_mask(resource, access),
                Ordering::AcqRel,
            );
            tracing::trace!(%resource, %access, "Granted shared access");
        }
    }

    /// Replaces the whole value, returning the previous one.
    ///
    /// This is the only way to narrow a shared set.
    pub fn replace(&self, perms: PermissionSet) -> PermissionSet {
        PermissionSet::from_raw(self.encoded.swap(perms.raw(), Ordering::AcqRel))
    }
}

impl From<PermissionSet> for SharedPermissionSet {
    fn from(perms: PermissionSet) -> Self {
        Self::new(perms)
    }
}
