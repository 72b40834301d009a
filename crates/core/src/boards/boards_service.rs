use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

use super::boards_model::{Board, BoardStock, BoardStockRecord, NewBoard, NewBoardStock};
use super::boards_traits::{BoardRepositoryTrait, BoardServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::markings::{MarkingRepositoryTrait, StockMarking};

pub const DUPLICATE_STOCK_MESSAGE: &str = "Stock already exists in this board";

/// Service for managing boards and their stocks
pub struct BoardService {
    repository: Arc<dyn BoardRepositoryTrait>,
    marking_repository: Arc<dyn MarkingRepositoryTrait>,
}

impl BoardService {
    pub fn new(
        repository: Arc<dyn BoardRepositoryTrait>,
        marking_repository: Arc<dyn MarkingRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            marking_repository,
        }
    }
}

#[async_trait]
impl BoardServiceTrait for BoardService {
    fn list_boards(&self) -> Result<Vec<Board>> {
        let records = self.repository.list()?;

        let mut markings_by_stock: HashMap<(i32, String), Vec<StockMarking>> = HashMap::new();
        for entry in self.marking_repository.list_all()? {
            markings_by_stock
                .entry((entry.board_id, entry.symbol))
                .or_default()
                .push(entry.marking);
        }

        let mut stocks_by_board: HashMap<i32, Vec<BoardStock>> = HashMap::new();
        for stock in self.repository.list_stocks()? {
            let markings = markings_by_stock
                .remove(&(stock.board_id, stock.symbol.clone()))
                .unwrap_or_default();
            stocks_by_board
                .entry(stock.board_id)
                .or_default()
                .push(BoardStock {
                    symbol: stock.symbol,
                    name: stock.name,
                    markings,
                });
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let stocks = stocks_by_board.remove(&record.id).unwrap_or_default();
                record.into_board(stocks)
            })
            .collect())
    }

    fn get_board(&self, board_id: i32) -> Result<Board> {
        let record = self
            .repository
            .get_by_id(board_id)?
            .ok_or_else(|| Error::NotFound("Board not found".to_string()))?;

        let stocks = self
            .repository
            .list_stocks_for_board(board_id)?
            .into_iter()
            .map(|stock| {
                let markings = self
                    .marking_repository
                    .list_for_stock(board_id, &stock.symbol)?;
                Ok(BoardStock {
                    symbol: stock.symbol,
                    name: stock.name,
                    markings,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(record.into_board(stocks))
    }

    async fn create_board(&self, new_board: NewBoard) -> Result<Board> {
        let title = new_board.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        let record = self.repository.create(NewBoard { title }).await?;
        info!("Created board {} ({})", record.id, record.title);
        Ok(record.into_board(Vec::new()))
    }

    async fn delete_board(&self, board_id: i32) -> Result<usize> {
        let deleted = self.repository.delete(board_id).await?;
        debug!("Deleted board {} ({} rows)", board_id, deleted);
        Ok(deleted)
    }

    async fn add_stock(&self, board_id: i32, stock: NewBoardStock) -> Result<BoardStockRecord> {
        let stock = NewBoardStock {
            symbol: stock.symbol.trim().to_string(),
            name: stock.name.trim().to_string(),
        };
        if stock.symbol.is_empty() || stock.name.is_empty() {
            return Err(ValidationError::MissingField("symbol and name".to_string()).into());
        }

        match self.repository.add_stock(board_id, stock).await {
            Ok(record) => Ok(record),
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                Err(Error::Conflict(DUPLICATE_STOCK_MESSAGE.to_string()))
            }
            Err(Error::Database(DatabaseError::ForeignKeyViolation(_))) => {
                Err(Error::NotFound("Board not found".to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn remove_stock(&self, board_id: i32, symbol: &str) -> Result<usize> {
        self.repository.remove_stock(board_id, symbol).await
    }
}
