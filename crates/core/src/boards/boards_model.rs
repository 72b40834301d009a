//! Board domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::markings::StockMarking;

/// A board with its stocks and their markings, as served to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: i32,
    pub title: String,
    pub stocks: Vec<BoardStock>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardStock {
    pub symbol: String,
    pub name: String,
    pub markings: Vec<StockMarking>,
}

/// Stored board row, without its stocks
#[derive(Debug, Clone, PartialEq)]
pub struct BoardRecord {
    pub id: i32,
    pub title: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl BoardRecord {
    pub fn into_board(self, stocks: Vec<BoardStock>) -> Board {
        Board {
            id: self.id,
            title: self.title,
            stocks,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Stored board stock row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BoardStockRecord {
    pub id: i32,
    pub board_id: i32,
    pub symbol: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBoard {
    pub title: String,
}

/// Input model for adding a stock to a board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBoardStock {
    pub symbol: String,
    pub name: String,
}
