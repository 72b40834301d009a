//! Boards module - named groups of stocks shared by every member.

mod boards_model;
mod boards_service;
mod boards_traits;


pub use boards_model::{Board, BoardRecord, BoardStock, BoardStockRecord, NewBoard, NewBoardStock};
pub use boards_service::BoardService;
pub use boards_traits::{BoardRepositoryTrait, BoardServiceTrait};
