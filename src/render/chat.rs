//! Chat transcript region.

use crate::chat::{ChatSession, Indicator};
use crate::model::chat::{ChatTurn, Role};
use crate::utils::format::escape_html;

use super::widget::{Widget, render};

pub fn transcript(chat: &ChatSession) -> String {
    if let Some(err) = chat.history_error()
        && chat.transcript().is_empty()
    {
        return render(&Widget::Error(err.to_string()));
    }

    let mut out = String::from(r#"<div class="chat-log">"#);
    if chat.transcript().is_empty() && !chat.has_echoes() {
        out.push_str(&render(&Widget::Note("No messages yet".into())));
    }
    for turn in chat.transcript().iter().chain(chat.echoes()) {
        write_turn(&mut out, turn);
    }
    match chat.indicator() {
        Some(Indicator::Typing) => {
            out.push_str(r#"<div class="chat-msg typing">Agents are typing…</div>"#)
        }
        Some(Indicator::Failed(msg)) => out.push_str(&format!(
            r#"<div class="chat-msg typing error">Error: {}</div>"#,
            escape_html(msg)
        )),
        None => {}
    }
    out.push_str("</div>");
    out
}

fn write_turn(out: &mut String, turn: &ChatTurn) {
    let (class, who) = match turn.role {
        Role::User => ("user", "You".to_string()),
        Role::Agent => (
            "agent",
            turn.agent.clone().unwrap_or_else(|| "agent".to_string()),
        ),
    };
    out.push_str(&format!(
        r#"<div class="chat-msg {class}"><span class="chat-who">{}</span><span class="chat-text">{}</span></div>"#,
        escape_html(&who),
        escape_html(&turn.content)
    ));
}
