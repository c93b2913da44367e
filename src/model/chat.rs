//! Broadcast chat transcript payloads.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    #[default]
    Agent,
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(match lenient::as_text(&v).to_ascii_lowercase().as_str() {
            "user" => Role::User,
            _ => Role::Agent,
        })
    }
}

/// One transcript entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatTurn {
    pub role: Role,
    #[serde(deserialize_with = "lenient::opt_text")]
    pub agent: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            agent: None,
            content: content.into(),
        }
    }
}

/// `GET /api/chat/history` and the response of `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatHistory {
    #[serde(deserialize_with = "lenient::list")]
    pub messages: Vec<ChatTurn>,
}
