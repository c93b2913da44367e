//! Broadcast chat session.
//!
//! The server transcript is authoritative. A send shows the operator's turn
//! immediately as a local echo plus a typing placeholder; its response
//! replaces the whole transcript and drops that send's echo. Sends are
//! numbered so a transcript older than one already applied is ignored.

use serde_json::json;

use crate::fetch::Request;
use crate::fetch::source::{CHAT_HISTORY_PATH, CHAT_PATH};
use crate::model::chat::{ChatHistory, ChatTurn};

/// Target filter meaning "every agent".
pub const ALL_AGENTS: &str = "all";

/// Transient line shown below the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indicator {
    Typing,
    Failed(String),
}

#[derive(Debug, Clone)]
struct Echo {
    send: u64,
    turn: ChatTurn,
    in_flight: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    transcript: Vec<ChatTurn>,
    /// Set once the history fetch has been issued; never cleared.
    loaded: bool,
    history_error: Option<String>,
    echoes: Vec<Echo>,
    indicator: Option<Indicator>,
    next_send: u64,
    /// Newest send whose transcript is on screen.
    applied_send: Option<u64>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// History request for the first chat tab visit, `None` afterwards.
    pub fn history_request(&mut self) -> Option<Request> {
        if self.loaded {
            return None;
        }
        self.loaded = true;
        Some(Request::Get(CHAT_HISTORY_PATH.to_string()))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Initial history. Ignored once any send response has landed.
    pub fn history_loaded(&mut self, history: ChatHistory) {
        if self.applied_send.is_some() {
            return;
        }
        self.transcript = history.messages;
        self.history_error = None;
    }

    pub fn history_failed(&mut self, message: String) {
        self.history_error = Some(message);
    }

    /// Start a send. Blank input yields `None` and leaves the session untouched.
    pub fn begin_send(&mut self, message: &str, target: &str) -> Option<(u64, Request)> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        let target = match target.trim() {
            "" => ALL_AGENTS,
            t => t,
        };
        let send = self.next_send;
        self.next_send += 1;
        self.echoes.push(Echo {
            send,
            turn: ChatTurn::user(message),
            in_flight: true,
        });
        self.indicator = Some(Indicator::Typing);
        let request = Request::Post {
            path: CHAT_PATH.to_string(),
            body: json!({ "message": message, "agent": target }),
        };
        Some((send, request))
    }

    /// Settle `send` with the server's history.
    pub fn send_succeeded(&mut self, send: u64, history: ChatHistory) {
        if self.applied_send.is_none_or(|applied| send >= applied) {
            self.transcript = history.messages;
            self.history_error = None;
            self.applied_send = Some(send);
        }
        self.echoes.retain(|e| e.send != send);
        self.indicator = self.in_flight().then_some(Indicator::Typing);
    }

    /// The echo of a failed send stays visible, no longer in flight.
    pub fn send_failed(&mut self, send: u64, message: String) {
        if let Some(echo) = self.echoes.iter_mut().find(|e| e.send == send) {
            echo.in_flight = false;
        }
        self.indicator = Some(Indicator::Failed(message));
    }

    fn in_flight(&self) -> bool {
        self.echoes.iter().any(|e| e.in_flight)
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }

    pub fn echoes(&self) -> impl Iterator<Item = &ChatTurn> {
        self.echoes.iter().map(|e| &e.turn)
    }

    pub fn has_echoes(&self) -> bool {
        !self.echoes.is_empty()
    }

    pub fn indicator(&self) -> Option<&Indicator> {
        self.indicator.as_ref()
    }

    pub fn history_error(&self) -> Option<&str> {
        self.history_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chat::Role;

    fn history(turns: &[(&str, &str)]) -> ChatHistory {
        ChatHistory {
            messages: turns
                .iter()
                .map(|(role, content)| ChatTurn {
                    role: if *role == "user" { Role::User } else { Role::Agent },
                    agent: None,
                    content: content.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn history_is_requested_once() {
        let mut chat = ChatSession::new();
        assert!(chat.history_request().is_some());
        assert!(chat.history_request().is_none());
        assert!(chat.is_loaded());
    }

    #[test]
    fn blank_send_is_a_no_op() {
        let mut chat = ChatSession::new();
        assert!(chat.begin_send("  \t\n", "all").is_none());
        assert!(!chat.has_echoes());
        assert!(chat.indicator().is_none());
    }

    #[test]
    fn send_echoes_then_server_replaces() {
        let mut chat = ChatSession::new();
        let (send, req) = chat.begin_send(" status? ", "").unwrap();
        assert_eq!(req.path(), "/api/chat");
        let Request::Post { body, .. } = req else {
            panic!("expected post");
        };
        assert_eq!(body, json!({"message": "status?", "agent": "all"}));
        assert_eq!(chat.echoes().count(), 1);
        assert_eq!(chat.indicator(), Some(&Indicator::Typing));

        chat.send_succeeded(send, history(&[("user", "status?"), ("agent", "all green")]));
        assert!(!chat.has_echoes());
        assert!(chat.indicator().is_none());
        assert_eq!(chat.transcript().len(), 2);
    }

    #[test]
    fn failed_send_keeps_transcript() {
        let mut chat = ChatSession::new();
        chat.history_loaded(history(&[("agent", "hello")]));
        let (send, _) = chat.begin_send("ping", "garves").unwrap();
        chat.send_failed(send, "connection refused".into());
        assert_eq!(chat.transcript().len(), 1);
        assert_eq!(chat.echoes().count(), 1);
        assert_eq!(
            chat.indicator(),
            Some(&Indicator::Failed("connection refused".into()))
        );
    }

    #[test]
    fn overlapping_sends_keep_typing_until_the_last_settles() {
        let mut chat = ChatSession::new();
        let (first, _) = chat.begin_send("one", "all").unwrap();
        let (second, _) = chat.begin_send("two", "all").unwrap();

        chat.send_succeeded(first, history(&[("user", "one"), ("agent", "ack one")]));
        let pending: Vec<_> = chat.echoes().map(|t| t.content.as_str()).collect();
        assert_eq!(pending, vec!["two"]);
        assert_eq!(chat.indicator(), Some(&Indicator::Typing));

        chat.send_succeeded(second, history(&[("user", "one"), ("user", "two")]));
        assert!(!chat.has_echoes());
        assert!(chat.indicator().is_none());
    }

    #[test]
    fn older_transcripts_never_replace_newer_ones() {
        let mut chat = ChatSession::new();
        chat.history_request();
        let (first, _) = chat.begin_send("one", "all").unwrap();
        let (second, _) = chat.begin_send("two", "all").unwrap();

        let newest = history(&[("user", "one"), ("user", "two"), ("agent", "done")]);
        chat.send_succeeded(second, newest);
        chat.send_succeeded(first, history(&[("user", "one")]));
        chat.history_loaded(history(&[]));
        assert_eq!(chat.transcript().len(), 3);
        assert!(!chat.has_echoes());
    }
}
