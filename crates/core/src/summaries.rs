//! Canned market commentary.
//!
//! No model is consulted: the texts are fixed templates filled with board
//! and stock names.

use serde::{Deserialize, Serialize};

use crate::boards::Board;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub headline: String,
    pub body: String,
}

const GLOBAL_HEADLINE: &str = "【要闻扫描】";
const GLOBAL_BODY: &str = "今日沪深两市成交额突破万亿，新能源与券商板块共振上涨。\
在此群关注的标的中，东方财富领涨大金融，带动市场风险偏好提升。\
【操作建议】北向资金午后加速净流入，建议关注核心资产板块的修复机会，\
警惕高位题材股退潮风险。AI 判定明日变盘概率：80%。";

const BOARD_HEADLINE: &str = "板块总结：";

/// Market-wide narrative.
pub fn global_summary() -> MarketSummary {
    MarketSummary {
        headline: GLOBAL_HEADLINE.to_string(),
        body: GLOBAL_BODY.to_string(),
    }
}

/// Narrative for one board, naming its first stock and its second (or the
/// first again when the board holds a single stock). `None` for an empty board.
pub fn board_summary(board: &Board) -> Option<MarketSummary> {
    let lead = board.stocks.first()?;
    let follow = board.stocks.get(1).unwrap_or(lead);
    Some(MarketSummary {
        headline: BOARD_HEADLINE.to_string(),
        body: format!(
            "{}整体呈现资金净流入态势。其中{}今日放量突破，主力资金净流入超 5 亿。\
建议关注{}是否跟随上涨，注意5日均线支撑。",
            board.title, lead.name, follow.name
        ),
    })
}
