//! Data-access layer for the users collection.
//!
//! [`UserRepository`](repositories::UserRepository) exposes list, retrieve,
//! create, update, and delete against a MongoDB `users` collection. Each call
//! is a single round trip to the store; there is no caching, batching, or
//! retrying here. Transport, authentication, and pool management belong to
//! the layers built on top of this crate.

pub mod config;
pub mod constants;
pub mod db;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod validators;

pub use config::Config;
pub use errors::StoreError;
pub use models::{Address, CreateAddressRequest, CreateUserRequest, User};
pub use repositories::UserRepository;
