//! Database models for markings.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use stockboard_core::markings::{BoardStockMarking, Marking, StockMarking};

/// Database model for stock markings
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::stock_markings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarkingDB {
    pub id: i32,
    pub user_id: String,
    pub board_id: i32,
    pub symbol: String,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for inserting or updating a marking
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::stock_markings)]
pub struct NewMarkingDB {
    pub user_id: String,
    pub board_id: i32,
    pub symbol: String,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A marking joined with its author's profile.
#[derive(Queryable, Debug, Clone)]
pub struct MarkingViewDB {
    pub board_id: i32,
    pub symbol: String,
    pub user_id: String,
    pub name: String,
    pub avatar: String,
    pub color: String,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
}

impl From<MarkingDB> for Marking {
    fn from(db: MarkingDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            board_id: db.board_id,
            symbol: db.symbol,
            buy_price: db.buy_price,
            sell_price: db.sell_price,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<MarkingViewDB> for BoardStockMarking {
    fn from(db: MarkingViewDB) -> Self {
        Self {
            board_id: db.board_id,
            symbol: db.symbol,
            marking: StockMarking {
                id: db.user_id,
                name: db.name,
                avatar: db.avatar,
                color: db.color,
                buy_price: db.buy_price,
                sell_price: db.sell_price,
            },
        }
    }
}
