//! Dashboard view models.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use stockboard_core::boards::{Board, BoardStock};
use stockboard_core::market_hours::MarketStatus;
use stockboard_core::markings::StockMarking;

/// One stock row. `price` and `change` stay `None` until the first
/// successful quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockView {
    pub symbol: String,
    pub name: String,
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub markings: Vec<StockMarking>,
}

impl StockView {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            price: None,
            change: None,
            markings: Vec::new(),
        }
    }

    /// A zero price counts as missing.
    pub fn has_price(&self) -> bool {
        self.price.is_some_and(|p| p != 0.0)
    }
}

impl From<BoardStock> for StockView {
    fn from(stock: BoardStock) -> Self {
        Self {
            symbol: stock.symbol,
            name: stock.name,
            price: None,
            change: None,
            markings: stock.markings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub id: i32,
    pub title: String,
    pub stocks: Vec<StockView>,
    /// Whether the canned summary card is expanded.
    pub ai_summary: bool,
}

impl From<Board> for BoardView {
    fn from(board: Board) -> Self {
        Self {
            id: board.id,
            title: board.title,
            stocks: board.stocks.into_iter().map(StockView::from).collect(),
            ai_summary: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub boards: Vec<BoardView>,
}

impl DashboardState {
    pub fn from_boards(boards: Vec<Board>) -> Self {
        Self {
            boards: boards.into_iter().map(BoardView::from).collect(),
        }
    }

    pub fn has_boards(&self) -> bool {
        !self.boards.is_empty()
    }

    pub fn has_stocks_without_price(&self) -> bool {
        self.boards
            .iter()
            .flat_map(|b| b.stocks.iter())
            .any(|s| !s.has_price())
    }

    /// Every tracked symbol across all boards, deduplicated, first
    /// occurrence order.
    pub fn all_symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = Vec::new();
        for stock in self.boards.iter().flat_map(|b| b.stocks.iter()) {
            if !symbols.contains(&stock.symbol) {
                symbols.push(stock.symbol.clone());
            }
        }
        symbols
    }

    pub fn board_mut(&mut self, board_id: i32) -> Option<&mut BoardView> {
        self.boards.iter_mut().find(|b| b.id == board_id)
    }
}

/// Dashboard state shared between the poller and whoever renders it.
pub type SharedDashboard = Arc<RwLock<DashboardState>>;

/// Body of `GET /market/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatusInfo {
    pub open: bool,
    pub status: MarketStatus,
    pub local_time: String,
}
