//! # partynet_core
//!
//! Core domain logic for the PartyNetwork auth gateway: credential checks,
//! session tokens, and the user/group store.

pub mod auth;
pub mod migrate;
pub mod models;
pub mod store;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
