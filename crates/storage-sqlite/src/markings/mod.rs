//! SQLite storage implementation for stock markings.

mod model;
mod repository;

pub use model::{MarkingDB, MarkingViewDB, NewMarkingDB};
pub use repository::MarkingRepository;
