//! Application constants module.
//!
//! Centralizes constant strings shared across the crate, currently the
//! collection names used by the repositories.

/// Name of the MongoDB collection holding user documents.
pub const COLLECTION_USERS: &str = "users";
