//! stripe-proxy permissions
//!
//! Packed per-resource access rights used to authorize proxied API calls.
//! A [`PermissionSet`] travels between components as exactly four
//! big-endian bytes.

pub mod config;
pub mod observability;
pub mod permissions;

pub use permissions::{
    AccessLevel, PermissionError, PermissionSet, Resource, Result, SharedPermissionSet,
};
