//! Data models organized by type.

pub mod user;

pub use user::*;
