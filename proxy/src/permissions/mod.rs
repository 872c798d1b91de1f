//! Permission system types and utilities.
//!
//! Two pieces of vocabulary and one packed value:
//! - [`Resource`]: the protected entity categories, plus the `All` wildcard
//! - [`AccessLevel`]: a 2-bit read/write lattice
//! - [`PermissionSet`]: one 2-bit field per resource, packed into a `u32`

pub mod access;
pub mod error;
pub mod resource;
pub mod set;
pub mod shared;

pub use access::AccessLevel;
pub use error::{PermissionError, Result};
pub use resource::Resource;
pub use set::PermissionSet;
pub use shared::SharedPermissionSet;
