//! SQLite storage implementation for the stock board.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `stockboard-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for boards, markings and users
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//!
//! ```text
//!        core (domain traits)
//!                │
//!                ▼
//!    storage-sqlite (this crate)
//!        │               │
//!   pooled reads    WriteHandle ──▶ writer actor (one connection)
//!        │               │
//!        └──────┬────────┘
//!               ▼
//!           SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod boards;
pub mod markings;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from stockboard-core for convenience
pub use stockboard_core::errors::{DatabaseError, Error, Result};
