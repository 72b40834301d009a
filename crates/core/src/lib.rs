//! Stockboard Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the collaborative stock board.
//! It is database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate; live prices come from `stockboard-market-data`.

pub mod boards;
pub mod clock;
pub mod constants;
pub mod errors;
pub mod market_hours;
pub mod markings;
pub mod quotes;
pub mod summaries;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
