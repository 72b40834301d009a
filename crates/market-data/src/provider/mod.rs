//! Upstream quote provider abstraction and implementations.
//!
//! This module contains:
//! - The `QuoteProvider` trait the domain layer depends on
//! - The Infoway HTTP implementation
//!
//! Every method is batched: callers pass the full symbol set and the provider
//! issues exactly one upstream request.

mod traits;

pub mod infoway;

pub use traits::QuoteProvider;
