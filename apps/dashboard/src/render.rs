//! Plain-text rendering of the dashboard.

use std::fmt::Write;

use stockboard_client::{DashboardState, StockView};
use stockboard_core::markings::StockMarking;

fn price_cell(price: Option<f64>) -> String {
    match price {
        Some(p) if p != 0.0 => format!("{:.2}", p),
        _ => "-".to_string(),
    }
}

fn change_cell(change: Option<f64>) -> String {
    match change {
        Some(c) if c > 0.0 => format!("+{:.2}%", c),
        Some(c) => format!("{:.2}%", c),
        None => "-".to_string(),
    }
}

fn marking_cell(marking: &StockMarking, me: Option<&str>) -> String {
    let mut cell = marking.avatar.clone();
    if me == Some(marking.id.as_str()) {
        cell.push('*');
    }
    let mut targets = Vec::new();
    if let Some(buy) = marking.buy_price {
        targets.push(format!("B{:.2}", buy));
    }
    if let Some(sell) = marking.sell_price {
        targets.push(format!("S{:.2}", sell));
    }
    if !targets.is_empty() {
        write!(cell, "({})", targets.join("/")).ok();
    }
    cell
}

fn stock_row(stock: &StockView, me: Option<&str>) -> String {
    let markings: Vec<String> = stock
        .markings
        .iter()
        .map(|m| marking_cell(m, me))
        .collect();
    format!(
        "  {:<10} {:<8} {:>10} {:>8}  {}",
        stock.symbol,
        stock.name,
        price_cell(stock.price),
        change_cell(stock.change),
        markings.join(" ")
    )
    .trim_end()
    .to_string()
}

/// Renders every board as a block of rows. `me` marks the viewer's own markings with `*`.
pub fn render(state: &DashboardState, header: &str, me: Option<&str>) -> String {
    let mut out = String::new();
    writeln!(out, "{}", header).ok();
    if !state.has_boards() {
        writeln!(out, "(no boards)").ok();
        return out;
    }
    for board in &state.boards {
        writeln!(out, "\n[{}] {}", board.id, board.title).ok();
        if board.stocks.is_empty() {
            writeln!(out, "  (empty)").ok();
            continue;
        }
        for stock in &board.stocks {
            writeln!(out, "{}", stock_row(stock, me)).ok();
        }
    }
    out
}
