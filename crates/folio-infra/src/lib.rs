//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`.
//! This crate contains the database repositories and the image asset stores.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod assets;
pub mod database;

#[cfg(test)]
mod lifecycle_tests;

pub use assets::{InMemoryAssetStore, LocalAssetStore};
pub use database::{InMemoryCategoryRepository, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, DatabasePool, PostgresCategoryRepository, PostgresPostRepository};
