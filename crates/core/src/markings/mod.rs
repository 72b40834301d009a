//! Markings module - per-user buy/sell targets on a board's stocks.

mod markings_model;
mod markings_service;
mod markings_traits;

#[cfg(test)]
mod markings_service_tests;

pub use markings_model::{BoardStockMarking, Marking, SaveMarking, SaveMarkingOutcome, StockMarking};
pub use markings_service::MarkingService;
pub use markings_traits::{MarkingRepositoryTrait, MarkingServiceTrait};
