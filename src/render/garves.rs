//! Trading agent panels.

use crate::model::trading::{LogFeed, Regime, Report4h, TradingSnapshot};
use crate::utils::format::{self, PLACEHOLDER};

use super::widget::{Cell, Stat, Table, Tone, Widget};

const MAX_TRADES: usize = 25;
const MAX_LOG_LINES: usize = 50;

pub fn trades(s: &TradingSnapshot) -> Widget {
    let decided = s.wins + s.losses;
    let stats = Widget::Stats(vec![
        Stat::new("Win rate", Cell::win_rate(s.wins, s.losses)),
        Stat::new("Wins", Cell::count(s.wins)),
        Stat::new("Losses", Cell::count(s.losses)),
        Stat::new("Pending", Cell::count(s.pending)),
        Stat::new("P&L", Cell::money(s.total_pnl)),
        Stat::new("Balance", Cell::money(s.balance)),
        Stat::new("Avg P&L / trade", format::ratio(s.total_pnl, decided, 2)),
    ]);

    let rows = s
        .trades
        .iter()
        .take(MAX_TRADES)
        .map(|t| {
            vec![
                Cell::or_dash(&t.time),
                Cell::or_dash(&t.market),
                Cell::from(t.side.to_uppercase()),
                Cell::from(format!("{:.2}", t.size)),
                Cell::from(format!("{:.3}", t.price)),
                Cell::from(format::pct(t.confidence, 0)),
                t.pnl.map_or(Cell::new(PLACEHOLDER, Tone::Muted), Cell::money),
                Cell::status(&t.status),
            ]
        })
        .collect();

    Widget::Stack(vec![
        stats,
        Widget::section(
            "Recent trades",
            Widget::Table(Table {
                columns: vec!["Time", "Market", "Side", "Size", "Price", "Conf", "P&L", "Status"],
                rows,
                empty: "No trades yet",
            }),
        ),
    ])
}

pub fn regime(r: &Regime) -> Widget {
    let label = if r.label.is_empty() {
        Cell::new(PLACEHOLDER, Tone::Muted)
    } else {
        Cell::new(r.label.to_uppercase(), regime_tone(&r.label))
    };
    Widget::Stats(vec![
        Stat::new("Regime", label),
        Stat::new("Confidence", format::pct(r.confidence, 0)),
        Stat::new(
            "Fear & Greed",
            r.fear_greed
                .map_or(Cell::new(PLACEHOLDER, Tone::Muted), Cell::count),
        ),
        Stat::new("Updated", Cell::or_dash(&r.updated)),
    ])
}

fn regime_tone(label: &str) -> Tone {
    let lower = label.to_ascii_lowercase();
    if lower.contains("bull") || lower.contains("greed") {
        Tone::Good
    } else if lower.contains("bear") || lower.contains("fear") {
        Tone::Bad
    } else {
        Tone::Caution
    }
}

pub fn logs(feed: &LogFeed) -> Widget {
    if feed.lines.is_empty() {
        return Widget::Note("No log output".into());
    }
    let start = feed.lines.len().saturating_sub(MAX_LOG_LINES);
    Widget::Lines(feed.lines[start..].to_vec())
}

/// Text report built only from the sections the backend sent.
pub fn report(r: &Report4h) -> Widget {
    let mut lines = Vec::new();
    if let Some(period) = &r.period {
        lines.push(format!("Period: {period}"));
    }
    if let Some(summary) = &r.summary {
        lines.push(summary.clone());
    }
    if let Some(trades) = r.trades {
        lines.push(format!("Trades: {trades:.0}"));
    }
    if let (Some(wins), Some(losses)) = (r.wins, r.losses) {
        lines.push(format!(
            "Record: {wins:.0}W / {losses:.0}L ({})",
            format::format_percent(wins, losses)
        ));
    }
    if let Some(pnl) = r.pnl {
        lines.push(format!("P&L: {}", format::money(pnl)));
    }
    if let Some(best) = &r.best_market {
        lines.push(format!("Best market: {best}"));
    }
    if let Some(worst) = &r.worst_market {
        lines.push(format!("Worst market: {worst}"));
    }
    lines.extend(r.notes.iter().map(|n| format!("- {n}")));

    if lines.is_empty() {
        Widget::Note("No 4h report yet".into())
    } else {
        Widget::Lines(lines)
    }
}
