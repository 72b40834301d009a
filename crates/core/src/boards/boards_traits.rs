use crate::boards::boards_model::{Board, BoardRecord, BoardStockRecord, NewBoard, NewBoardStock};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for board repository operations
#[async_trait]
pub trait BoardRepositoryTrait: Send + Sync {
    /// All boards ordered by id.
    fn list(&self) -> Result<Vec<BoardRecord>>;
    fn get_by_id(&self, board_id: i32) -> Result<Option<BoardRecord>>;
    /// Stocks of all boards, in insertion order.
    fn list_stocks(&self) -> Result<Vec<BoardStockRecord>>;
    fn list_stocks_for_board(&self, board_id: i32) -> Result<Vec<BoardStockRecord>>;
    async fn create(&self, new_board: NewBoard) -> Result<BoardRecord>;
    /// Deletes the board; its stocks and markings go with it.
    async fn delete(&self, board_id: i32) -> Result<usize>;
    async fn add_stock(&self, board_id: i32, stock: NewBoardStock) -> Result<BoardStockRecord>;
    /// Removes the stock and every marking on it within the board.
    async fn remove_stock(&self, board_id: i32, symbol: &str) -> Result<usize>;
}

/// Trait for board service operations
#[async_trait]
pub trait BoardServiceTrait: Send + Sync {
    fn list_boards(&self) -> Result<Vec<Board>>;
    fn get_board(&self, board_id: i32) -> Result<Board>;
    async fn create_board(&self, new_board: NewBoard) -> Result<Board>;
    async fn delete_board(&self, board_id: i32) -> Result<usize>;
    async fn add_stock(&self, board_id: i32, stock: NewBoardStock) -> Result<BoardStockRecord>;
    async fn remove_stock(&self, board_id: i32, symbol: &str) -> Result<usize>;
}
