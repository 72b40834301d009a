use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::markings_model::{is_unset, SaveMarking, SaveMarkingOutcome, StockMarking};
use super::markings_traits::{MarkingRepositoryTrait, MarkingServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};

/// Service for reading and writing stock markings
pub struct MarkingService {
    repository: Arc<dyn MarkingRepositoryTrait>,
}

impl MarkingService {
    pub fn new(repository: Arc<dyn MarkingRepositoryTrait>) -> Self {
        Self { repository }
    }
}

fn normalize_price(field: &str, price: Option<f64>) -> Result<Option<f64>> {
    if is_unset(price) {
        return Ok(None);
    }
    match price {
        Some(p) if p.is_finite() && p > 0.0 => Ok(Some(p)),
        _ => Err(Error::invalid_input(format!(
            "{} must be a positive number",
            field
        ))),
    }
}

#[async_trait]
impl MarkingServiceTrait for MarkingService {
    fn get_markings(&self, board_id: i32, symbol: &str) -> Result<Vec<StockMarking>> {
        self.repository.list_for_stock(board_id, symbol)
    }

    async fn save_marking(&self, input: SaveMarking) -> Result<SaveMarkingOutcome> {
        let user_id = input.user_id.trim().to_string();
        let symbol = input.symbol.trim().to_string();
        if user_id.is_empty() || symbol.is_empty() || input.board_id <= 0 {
            return Err(
                ValidationError::MissingField("userId, boardId and symbol".to_string()).into(),
            );
        }

        if input.is_empty() {
            debug!("Clearing marking of {} on {}/{}", user_id, input.board_id, symbol);
            self.repository.delete(&user_id, input.board_id, &symbol).await?;
            return Ok(SaveMarkingOutcome::Removed);
        }

        let marking = SaveMarking {
            buy_price: normalize_price("buyPrice", input.buy_price)?,
            sell_price: normalize_price("sellPrice", input.sell_price)?,
            user_id,
            board_id: input.board_id,
            symbol,
        };

        match self.repository.upsert(marking).await {
            Ok(saved) => Ok(SaveMarkingOutcome::Saved(saved)),
            Err(Error::Database(DatabaseError::ForeignKeyViolation(_))) => {
                Err(Error::NotFound("Board or user not found".to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn delete_marking(&self, board_id: i32, symbol: &str, user_id: &str) -> Result<usize> {
        self.repository.delete(user_id, board_id, symbol).await
    }
}
