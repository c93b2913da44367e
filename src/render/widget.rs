//! Generic widget tree and its markup renderer.
//!
//! Domain renderers never build HTML by hand; they project their typed model
//! into a [`Widget`] and this module serializes it. All free text passes
//! through [`escape_html`] here, which makes this file the injection
//! boundary for agent-supplied content. [`Widget::Svg`] is the only raw
//! variant and is reserved for markup generated by [`crate::radar`].

use crate::actions::Action;
use crate::utils::format::{self, escape_html};

/// Visual emphasis of a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Plain,
    Good,
    Caution,
    Bad,
    Muted,
}

impl Tone {
    fn class(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Good => Some("good"),
            Self::Caution => Some("caution"),
            Self::Bad => Some("bad"),
            Self::Muted => Some("muted"),
        }
    }

    pub fn from_win_rate(rate: f64) -> Self {
        match format::win_rate_color(rate) {
            "good" => Self::Good,
            "caution" => Self::Caution,
            _ => Self::Bad,
        }
    }

    /// Tone for free-form status words coming from agents.
    pub fn from_status(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "ok" | "online" | "running" | "healthy" | "approved" | "posted" | "done"
            | "complete" | "completed" | "active" | "safe" => Self::Good,
            "pending" | "queued" | "warning" | "idle" | "generated" | "review" | "paused" => {
                Self::Caution
            }
            "error" | "failed" | "offline" | "critical" | "rejected" | "stopped" | "unsafe"
            | "down" => Self::Bad,
            _ => Self::Plain,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    /// Currency, with negatives toned apart from non-negatives.
    pub fn money(value: f64) -> Self {
        let tone = if format::money_class(value) == "neg" {
            Tone::Bad
        } else {
            Tone::Good
        };
        Self::new(format::money(value), tone)
    }

    pub fn win_rate(wins: f64, losses: f64) -> Self {
        let tone = format::win_rate(wins, losses).map_or(Tone::Muted, Tone::from_win_rate);
        Self::new(format::format_percent(wins, losses), tone)
    }

    pub fn status(status: &str) -> Self {
        if status.is_empty() {
            return Self::new(format::PLACEHOLDER, Tone::Muted);
        }
        Self::new(status, Tone::from_status(status))
    }

    /// Whole number without a trailing `.0`.
    pub fn count(value: f64) -> Self {
        if !value.is_finite() {
            return Self::new(format::PLACEHOLDER, Tone::Muted);
        }
        Self::from(format!("{value:.0}"))
    }

    /// Text, or the placeholder dash when blank.
    pub fn or_dash(text: &str) -> Self {
        if text.trim().is_empty() {
            Self::new(format::PLACEHOLDER, Tone::Muted)
        } else {
            Self::from(text)
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::new(text, Tone::Plain)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::new(text, Tone::Plain)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub label: String,
    pub value: Cell,
}

impl Stat {
    pub fn new(label: impl Into<String>, value: impl Into<Cell>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
    /// Shown instead of an empty table.
    pub empty: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub action: Action,
    /// Ask the operator for the action's `text` before sending.
    pub prompt: Option<&'static str>,
}

impl Button {
    pub fn new(label: &'static str, action: Action) -> Self {
        Self {
            label,
            action,
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: &'static str) -> Self {
        self.prompt = Some(prompt);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub label: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Card {
    pub title: String,
    pub meta: Vec<Cell>,
    pub body: String,
    pub buttons: Vec<Button>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Stats(Vec<Stat>),
    Table(Table),
    Cards {
        items: Vec<Card>,
        empty: &'static str,
    },
    /// Monospace lines, e.g. log output.
    Lines(Vec<String>),
    Text(String),
    Note(String),
    Error(String),
    /// Horizontal bar for a 0–1 fraction.
    Progress(f64),
    Buttons(Vec<Button>),
    Links(Vec<Link>),
    Section(String, Box<Widget>),
    Stack(Vec<Widget>),
    /// Trusted markup from the radar engine.
    Svg(String),
}

impl Widget {
    pub fn section(title: impl Into<String>, body: Widget) -> Self {
        Self::Section(title.into(), Box::new(body))
    }
}

/// Serialize a widget tree.
pub fn render(widget: &Widget) -> String {
    let mut out = String::new();
    write_widget(&mut out, widget);
    out
}

fn write_widget(out: &mut String, widget: &Widget) {
    match widget {
        Widget::Stats(stats) => {
            out.push_str(r#"<div class="stats">"#);
            for stat in stats {
                out.push_str(&format!(
                    r#"<div class="stat"><div class="stat-label">{}</div><div class="stat-value">{}</div></div>"#,
                    escape_html(&stat.label),
                    cell(&stat.value)
                ));
            }
            out.push_str("</div>");
        }
        Widget::Table(table) => write_table(out, table),
        Widget::Cards { items, empty } => {
            if items.is_empty() {
                write_note(out, empty);
                return;
            }
            out.push_str(r#"<div class="cards">"#);
            for card in items {
                write_card(out, card);
            }
            out.push_str("</div>");
        }
        Widget::Lines(lines) => {
            out.push_str(r#"<pre class="lines">"#);
            let escaped: Vec<String> = lines.iter().map(|l| escape_html(l)).collect();
            out.push_str(&escaped.join("\n"));
            out.push_str("</pre>");
        }
        Widget::Text(text) => {
            out.push_str(&format!(r#"<p class="text">{}</p>"#, escape_html(text)));
        }
        Widget::Note(text) => write_note(out, text),
        Widget::Error(message) => {
            out.push_str(&format!(
                r#"<div class="error">Error: {}</div>"#,
                escape_html(message)
            ));
        }
        Widget::Progress(fraction) => {
            let width = if fraction.is_finite() {
                fraction.clamp(0.0, 1.0) * 100.0
            } else {
                0.0
            };
            out.push_str(&format!(
                r#"<div class="progress"><div class="progress-fill" style="width:{width:.1}%"></div></div>"#
            ));
        }
        Widget::Buttons(buttons) => {
            out.push_str(r#"<div class="buttons">"#);
            for b in buttons {
                write_button(out, b);
            }
            out.push_str("</div>");
        }
        Widget::Links(links) => {
            out.push_str(r#"<div class="buttons">"#);
            for link in links {
                write_link(out, link);
            }
            out.push_str("</div>");
        }
        Widget::Section(title, body) => {
            out.push_str(&format!(
                r#"<section><h3>{}</h3>"#,
                escape_html(title)
            ));
            write_widget(out, body);
            out.push_str("</section>");
        }
        Widget::Stack(children) => {
            for child in children {
                write_widget(out, child);
            }
        }
        Widget::Svg(svg) => out.push_str(svg),
    }
}

fn cell(c: &Cell) -> String {
    match c.tone.class() {
        Some(class) => format!(r#"<span class="{class}">{}</span>"#, escape_html(&c.text)),
        None => escape_html(&c.text),
    }
}

fn write_note(out: &mut String, text: &str) {
    out.push_str(&format!(r#"<div class="note">{}</div>"#, escape_html(text)));
}

fn write_table(out: &mut String, table: &Table) {
    if table.rows.is_empty() {
        write_note(out, table.empty);
        return;
    }
    out.push_str("<table><thead><tr>");
    for col in &table.columns {
        out.push_str(&format!("<th>{}</th>", escape_html(col)));
    }
    out.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        out.push_str("<tr>");
        for c in row {
            out.push_str(&format!("<td>{}</td>", cell(c)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

fn write_card(out: &mut String, card: &Card) {
    out.push_str(r#"<div class="card">"#);
    out.push_str(&format!(
        r#"<div class="card-title">{}</div>"#,
        escape_html(&card.title)
    ));
    if !card.meta.is_empty() {
        let meta: Vec<String> = card.meta.iter().map(cell).collect();
        out.push_str(&format!(
            r#"<div class="card-meta">{}</div>"#,
            meta.join(" · ")
        ));
    }
    if !card.body.is_empty() {
        out.push_str(&format!(
            r#"<div class="card-body">{}</div>"#,
            escape_html(&card.body)
        ));
    }
    if !card.buttons.is_empty() || !card.links.is_empty() {
        out.push_str(r#"<div class="buttons">"#);
        for b in &card.buttons {
            write_button(out, b);
        }
        for link in &card.links {
            write_link(out, link);
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn write_link(out: &mut String, link: &Link) {
    out.push_str(&format!(
        r#"<a class="btn" href="{}" target="_blank">{}</a>"#,
        escape_html(&link.href),
        escape_html(link.label)
    ));
}

fn write_button(out: &mut String, b: &Button) {
    // Serializing a plain enum cannot fail; an empty payload is inert anyway.
    let payload = serde_json::to_string(&b.action).unwrap_or_default();
    let prompt = b
        .prompt
        .map(|p| format!(r#" data-prompt="{}""#, escape_html(p)))
        .unwrap_or_default();
    out.push_str(&format!(
        r#"<button class="btn" data-action="{}"{prompt}>{}</button>"#,
        escape_html(&payload),
        escape_html(b.label)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_cells_are_escaped() {
        let html = render(&Widget::Table(Table {
            columns: vec!["Caption"],
            rows: vec![vec![Cell::from("<script>x</script>")]],
            empty: "none",
        }));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn empty_table_renders_note() {
        let html = render(&Widget::Table(Table {
            columns: vec!["A"],
            rows: vec![],
            empty: "No rows yet",
        }));
        assert_eq!(html, r#"<div class="note">No rows yet</div>"#);
    }

    #[test]
    fn error_widget_uses_literal_prefix() {
        let html = render(&Widget::Error("connection refused".into()));
        assert!(html.contains("Error: connection refused"));
    }

    #[test]
    fn money_cell_tones_by_sign() {
        assert_eq!(Cell::money(-2.0).tone, Tone::Bad);
        assert_eq!(Cell::money(2.0).tone, Tone::Good);
        assert_eq!(Cell::money(-2.0).text, "-$2.00");
    }

    #[test]
    fn win_rate_cell_without_outcomes_is_dash() {
        let c = Cell::win_rate(0.0, 0.0);
        assert_eq!(c.text, "--");
        assert_eq!(c.tone, Tone::Muted);
        assert_eq!(Cell::win_rate(11.0, 9.0).tone, Tone::Good);
    }

    #[test]
    fn button_payload_is_attribute_safe() {
        let html = render(&Widget::Buttons(vec![Button::new(
            "Approve",
            Action::SorenApprove { id: "a\"b".into() },
        )]));
        assert!(html.contains("data-action=\"{&quot;kind&quot;"));
        assert!(!html.contains("a\"b"));
    }

    #[test]
    fn progress_clamps() {
        assert!(render(&Widget::Progress(2.0)).contains("width:100.0%"));
        assert!(render(&Widget::Progress(f64::NAN)).contains("width:0.0%"));
    }
}
