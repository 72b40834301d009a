use stockboard_core::markings::{
    BoardStockMarking, Marking, MarkingRepositoryTrait, SaveMarking, StockMarking,
};
use stockboard_core::Result;

use super::model::{MarkingDB, MarkingViewDB, NewMarkingDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{stock_markings, users};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct MarkingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl MarkingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        MarkingRepository { pool, writer }
    }
}

/// Columns in [`MarkingViewDB`] order.
type MarkingViewColumns = (
    stock_markings::board_id,
    stock_markings::symbol,
    users::id,
    users::name,
    users::avatar,
    users::color,
    stock_markings::buy_price,
    stock_markings::sell_price,
);

const MARKING_VIEW_COLUMNS: MarkingViewColumns = (
    stock_markings::board_id,
    stock_markings::symbol,
    users::id,
    users::name,
    users::avatar,
    users::color,
    stock_markings::buy_price,
    stock_markings::sell_price,
);

#[async_trait]
impl MarkingRepositoryTrait for MarkingRepository {
    fn list_for_stock(&self, board_id: i32, symbol: &str) -> Result<Vec<StockMarking>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = stock_markings::table
            .inner_join(users::table)
            .filter(stock_markings::board_id.eq(board_id))
            .filter(stock_markings::symbol.eq(symbol))
            .order((stock_markings::created_at.desc(), stock_markings::id.desc()))
            .select(MARKING_VIEW_COLUMNS)
            .load::<MarkingViewDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|row| BoardStockMarking::from(row).marking)
            .collect())
    }

    fn list_all(&self) -> Result<Vec<BoardStockMarking>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = stock_markings::table
            .inner_join(users::table)
            .order((stock_markings::created_at.desc(), stock_markings::id.desc()))
            .select(MARKING_VIEW_COLUMNS)
            .load::<MarkingViewDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(BoardStockMarking::from).collect())
    }

    async fn upsert(&self, marking: SaveMarking) -> Result<Marking> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Marking> {
                let now = Utc::now().naive_utc();
                let row = NewMarkingDB {
                    user_id: marking.user_id,
                    board_id: marking.board_id,
                    symbol: marking.symbol,
                    buy_price: marking.buy_price,
                    sell_price: marking.sell_price,
                    created_at: now,
                    updated_at: now,
                };

                diesel::insert_into(stock_markings::table)
                    .values(&row)
                    .on_conflict((
                        stock_markings::user_id,
                        stock_markings::board_id,
                        stock_markings::symbol,
                    ))
                    .do_update()
                    .set((
                        stock_markings::buy_price.eq(row.buy_price),
                        stock_markings::sell_price.eq(row.sell_price),
                        stock_markings::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let saved = stock_markings::table
                    .filter(stock_markings::user_id.eq(&row.user_id))
                    .filter(stock_markings::board_id.eq(row.board_id))
                    .filter(stock_markings::symbol.eq(&row.symbol))
                    .select(MarkingDB::as_select())
                    .first::<MarkingDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Marking::from(saved))
            })
            .await
    }

    async fn delete(&self, user_id: &str, board_id: i32, symbol: &str) -> Result<usize> {
        let user_id = user_id.to_string();
        let symbol = symbol.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(
                    stock_markings::table
                        .filter(stock_markings::user_id.eq(user_id))
                        .filter(stock_markings::board_id.eq(board_id))
                        .filter(stock_markings::symbol.eq(symbol)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
