//! Repository layer for database operations.
//!
//! This module keeps all store access behind one type so callers deal in
//! domain models and [`StoreError`](crate::errors::StoreError) kinds rather
//! than driver types.

pub mod user_repository;

pub use user_repository::UserRepository;
