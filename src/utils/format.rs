//! Pure formatting helpers shared by every renderer.
//!
//! Nothing here holds state. Every function is total: zero denominators,
//! NaN and infinities collapse to [`PLACEHOLDER`] instead of leaking
//! `NaN` or `inf` into the page.

/// Rendered in place of any ratio that cannot be computed.
pub const PLACEHOLDER: &str = "--";

/// Escape text for insertion into HTML element content or a quoted attribute.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Win share of a wins/losses pair, e.g. `format_percent(3.0, 1.0) == "75.0%"`.
///
/// Returns [`PLACEHOLDER`] when there are no decided outcomes yet.
pub fn format_percent(wins: f64, losses: f64) -> String {
    let total = wins + losses;
    if !total.is_finite() || total <= 0.0 {
        return PLACEHOLDER.to_string();
    }
    format!("{:.1}%", wins / total * 100.0)
}

/// Win share as a 0–100 number, `None` when undefined.
pub fn win_rate(wins: f64, losses: f64) -> Option<f64> {
    let total = wins + losses;
    (total.is_finite() && total > 0.0).then(|| wins / total * 100.0)
}

/// Render a 0–1 fraction as a percentage with `decimals` places.
pub fn pct(fraction: f64, decimals: usize) -> String {
    if !fraction.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// `numerator / denominator` with `decimals` places, or [`PLACEHOLDER`].
pub fn ratio(numerator: f64, denominator: f64, decimals: usize) -> String {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.*}", decimals, numerator / denominator)
}

/// Dollar amount with two decimals; the sign goes before the `$`.
pub fn money(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

/// CSS class distinguishing negative amounts from non-negative ones.
pub fn money_class(value: f64) -> &'static str {
    if value < 0.0 { "neg" } else { "pos" }
}

/// Three-tier color for a 0–100 win rate.
pub fn win_rate_color(rate: f64) -> &'static str {
    if rate >= 50.0 {
        "good"
    } else if rate >= 40.0 {
        "caution"
    } else {
        "bad"
    }
}

/// Compact uptime: `3d 4h`, `5h 12m`, `7m`, `45s`.
pub fn format_uptime(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0s".to_string();
    }
    let total = seconds as u64;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        format!("{total}s")
    }
}

/// `win_rate` → `Win Rate`.
pub fn title_case(key: &str) -> String {
    key.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to `max_chars` characters, appending "…" if truncated.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
