//! Marking domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A user's price targets on one stock, as shown to the other members.
///
/// `id` is the id of the user who placed the marking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockMarking {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub color: String,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
}

/// A [`StockMarking`] tagged with the board stock it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardStockMarking {
    pub board_id: i32,
    pub symbol: String,
    pub marking: StockMarking,
}

/// Stored marking row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Marking {
    pub id: i32,
    pub user_id: String,
    pub board_id: i32,
    pub symbol: String,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for saving a marking
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveMarking {
    pub user_id: String,
    pub board_id: i32,
    pub symbol: String,
    pub buy_price: Option<f64>,
    pub sell_price: Option<f64>,
}

impl SaveMarking {
    /// True when neither price carries a target. Zero counts as no target.
    pub fn is_empty(&self) -> bool {
        is_unset(self.buy_price) && is_unset(self.sell_price)
    }
}

pub(crate) fn is_unset(price: Option<f64>) -> bool {
    price.map_or(true, |p| p == 0.0)
}

/// Result of [`save_marking`](super::MarkingServiceTrait::save_marking).
#[derive(Debug, Clone, PartialEq)]
pub enum SaveMarkingOutcome {
    Saved(Marking),
    /// Both prices were empty, so the user's marking was removed.
    Removed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_prices_count_as_empty() {
        let input = SaveMarking {
            buy_price: Some(0.0),
            sell_price: None,
            ..Default::default()
        };
        assert!(input.is_empty());

        let input = SaveMarking {
            buy_price: Some(0.0),
            sell_price: Some(12.5),
            ..Default::default()
        };
        assert!(!input.is_empty());
    }

    #[test]
    fn test_save_marking_deserializes_camel_case() {
        let input: SaveMarking = serde_json::from_str(
            r#"{"userId":"u_1","boardId":3,"symbol":"600519.SH","buyPrice":1500.5}"#,
        )
        .unwrap();
        assert_eq!(input.board_id, 3);
        assert_eq!(input.buy_price, Some(1500.5));
        assert_eq!(input.sell_price, None);
    }
}
