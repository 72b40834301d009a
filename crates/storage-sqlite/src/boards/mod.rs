//! SQLite storage implementation for boards and their stocks.

mod model;
mod repository;

pub use model::{BoardDB, BoardStockDB, NewBoardDB, NewBoardStockDB};
pub use repository::BoardRepository;
