//! Database models for boards.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use stockboard_core::boards::{BoardRecord, BoardStockRecord};

/// Database model for boards
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::boards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BoardDB {
    pub id: i32,
    pub title: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a board
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::boards)]
pub struct NewBoardDB {
    pub title: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for a stock pinned to a board
#[derive(Queryable, Identifiable, Selectable, Associations, PartialEq, Debug, Clone)]
#[diesel(belongs_to(BoardDB, foreign_key = board_id))]
#[diesel(table_name = crate::schema::board_stocks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BoardStockDB {
    pub id: i32,
    pub board_id: i32,
    pub symbol: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Database model for adding a stock to a board
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::board_stocks)]
pub struct NewBoardStockDB {
    pub board_id: i32,
    pub symbol: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<BoardDB> for BoardRecord {
    fn from(db: BoardDB) -> Self {
        Self {
            id: db.id,
            title: db.title,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<BoardStockDB> for BoardStockRecord {
    fn from(db: BoardStockDB) -> Self {
        Self {
            id: db.id,
            board_id: db.board_id,
            symbol: db.symbol,
            name: db.name,
            created_at: db.created_at,
        }
    }
}
