use crate::errors::Result;
use crate::markings::markings_model::{
    BoardStockMarking, Marking, SaveMarking, SaveMarkingOutcome, StockMarking,
};
use async_trait::async_trait;

/// Trait for marking repository operations
#[async_trait]
pub trait MarkingRepositoryTrait: Send + Sync {
    /// Markings on one board stock, newest first.
    fn list_for_stock(&self, board_id: i32, symbol: &str) -> Result<Vec<StockMarking>>;
    /// Every marking on every board, newest first.
    fn list_all(&self) -> Result<Vec<BoardStockMarking>>;
    async fn upsert(&self, marking: SaveMarking) -> Result<Marking>;
    async fn delete(&self, user_id: &str, board_id: i32, symbol: &str) -> Result<usize>;
}

/// Trait for marking service operations
#[async_trait]
pub trait MarkingServiceTrait: Send + Sync {
    fn get_markings(&self, board_id: i32, symbol: &str) -> Result<Vec<StockMarking>>;
    async fn save_marking(&self, input: SaveMarking) -> Result<SaveMarkingOutcome>;
    async fn delete_marking(&self, board_id: i32, symbol: &str, user_id: &str) -> Result<usize>;
}
