use stockboard_core::boards::{
    BoardRecord, BoardRepositoryTrait, BoardStockRecord, NewBoard, NewBoardStock,
};
use stockboard_core::Result;

use super::model::{BoardDB, BoardStockDB, NewBoardDB, NewBoardStockDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{board_stocks, boards, stock_markings};
use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct BoardRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BoardRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        BoardRepository { pool, writer }
    }
}

fn touch_board(conn: &mut SqliteConnection, board_id: i32) -> QueryResult<usize> {
    diesel::update(boards::table.find(board_id))
        .set(boards::updated_at.eq(Utc::now().naive_utc()))
        .execute(conn)
}

#[async_trait]
impl BoardRepositoryTrait for BoardRepository {
    fn list(&self) -> Result<Vec<BoardRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = boards::table
            .order(boards::id.asc())
            .select(BoardDB::as_select())
            .load::<BoardDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(BoardRecord::from).collect())
    }

    fn get_by_id(&self, board_id: i32) -> Result<Option<BoardRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let row = boards::table
            .find(board_id)
            .select(BoardDB::as_select())
            .first::<BoardDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(BoardRecord::from))
    }

    fn list_stocks(&self) -> Result<Vec<BoardStockRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = board_stocks::table
            .order(board_stocks::id.asc())
            .select(BoardStockDB::as_select())
            .load::<BoardStockDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(BoardStockRecord::from).collect())
    }

    fn list_stocks_for_board(&self, board_id: i32) -> Result<Vec<BoardStockRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = board_stocks::table
            .filter(board_stocks::board_id.eq(board_id))
            .order(board_stocks::id.asc())
            .select(BoardStockDB::as_select())
            .load::<BoardStockDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(BoardStockRecord::from).collect())
    }

    async fn create(&self, new_board: NewBoard) -> Result<BoardRecord> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BoardRecord> {
                let now = Utc::now().naive_utc();
                let row = diesel::insert_into(boards::table)
                    .values(&NewBoardDB {
                        title: new_board.title,
                        created_at: now,
                        updated_at: now,
                    })
                    .returning(BoardDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(BoardRecord::from(row))
            })
            .await
    }

    async fn delete(&self, board_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(boards::table.find(board_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn add_stock(&self, board_id: i32, stock: NewBoardStock) -> Result<BoardStockRecord> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BoardStockRecord> {
                let row = diesel::insert_into(board_stocks::table)
                    .values(&NewBoardStockDB {
                        board_id,
                        symbol: stock.symbol,
                        name: stock.name,
                        created_at: Utc::now().naive_utc(),
                    })
                    .returning(BoardStockDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                touch_board(conn, board_id).map_err(StorageError::from)?;
                Ok(BoardStockRecord::from(row))
            })
            .await
    }

    async fn remove_stock(&self, board_id: i32, symbol: &str) -> Result<usize> {
        let symbol = symbol.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    stock_markings::table
                        .filter(stock_markings::board_id.eq(board_id))
                        .filter(stock_markings::symbol.eq(&symbol)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                let removed = diesel::delete(
                    board_stocks::table
                        .filter(board_stocks::board_id.eq(board_id))
                        .filter(board_stocks::symbol.eq(&symbol)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;

                if removed > 0 {
                    touch_board(conn, board_id).map_err(StorageError::from)?;
                }
                Ok(removed)
            })
            .await
    }
}
