//! Operator actions: fire-and-forget POSTs against agent endpoints.
//!
//! An action never mutates local view state. On completion the controller
//! reports the outcome in the `action-status` strip and re-runs the active
//! tab's refresh pass, so the effect shows up through a fresh snapshot.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::fetch::Request;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Action {
    SorenGenerate { id: String },
    SorenApprove { id: String },
    SorenReject { id: String },
    MercuryReviewAll,
    MercuryReview { id: String },
    MercuryReply { id: String, text: String },
    AtlasBackgroundStart,
    AtlasBackgroundStop,
    AtlasReport,
    AtlasImprovements,
    AtlasAcknowledge { id: String },
    SentinelScan,
    SentinelBug { text: String },
}

impl Action {
    /// Short human label for the status strip and the activity log.
    pub fn label(&self) -> String {
        match self {
            Self::SorenGenerate { id } => format!("generate {id}"),
            Self::SorenApprove { id } => format!("approve {id}"),
            Self::SorenReject { id } => format!("reject {id}"),
            Self::MercuryReviewAll => "review queue".to_string(),
            Self::MercuryReview { id } => format!("review {id}"),
            Self::MercuryReply { id, .. } => format!("reply {id}"),
            Self::AtlasBackgroundStart => "start research".to_string(),
            Self::AtlasBackgroundStop => "stop research".to_string(),
            Self::AtlasReport => "research report".to_string(),
            Self::AtlasImprovements => "generate improvements".to_string(),
            Self::AtlasAcknowledge { id } => format!("acknowledge {id}"),
            Self::SentinelScan => "health scan".to_string(),
            Self::SentinelBug { .. } => "bug report".to_string(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::SorenGenerate { id } => format!("/api/soren/generate/{id}"),
            Self::SorenApprove { id } => format!("/api/soren/approve/{id}"),
            Self::SorenReject { id } => format!("/api/soren/reject/{id}"),
            Self::MercuryReviewAll => "/api/mercury/review".to_string(),
            Self::MercuryReview { id } => format!("/api/mercury/review/{id}"),
            Self::MercuryReply { .. } => "/api/mercury/reply".to_string(),
            Self::AtlasBackgroundStart => "/api/atlas/background/start".to_string(),
            Self::AtlasBackgroundStop => "/api/atlas/background/stop".to_string(),
            Self::AtlasReport => "/api/atlas/report".to_string(),
            Self::AtlasImprovements => "/api/atlas/improvements".to_string(),
            Self::AtlasAcknowledge { .. } => "/api/atlas/improvements/acknowledge".to_string(),
            Self::SentinelScan => "/api/sentinel/scan".to_string(),
            Self::SentinelBug { .. } => "/api/sentinel/bugs".to_string(),
        }
    }

    pub fn body(&self) -> Value {
        match self {
            Self::MercuryReply { id, text } => json!({ "id": id, "text": text.trim() }),
            Self::AtlasAcknowledge { id } => json!({ "id": id }),
            Self::SentinelBug { text } => json!({ "description": text.trim() }),
            _ => json!({}),
        }
    }

    /// Reject input that must not reach the network.
    ///
    /// Text-carrying actions need non-blank text. Ids are interpolated
    /// into URL paths, so they are limited to a path-safe alphabet.
    pub fn validate(&self) -> Result<()> {
        let id = match self {
            Self::SorenGenerate { id }
            | Self::SorenApprove { id }
            | Self::SorenReject { id }
            | Self::MercuryReview { id }
            | Self::MercuryReply { id, .. }
            | Self::AtlasAcknowledge { id } => Some(id),
            _ => None,
        };
        if let Some(id) = id
            && !is_path_safe(id)
        {
            bail!("invalid id: {id:?}");
        }

        match self {
            Self::MercuryReply { text, .. } | Self::SentinelBug { text }
                if text.trim().is_empty() =>
            {
                bail!("text must not be empty")
            }
            _ => Ok(()),
        }
    }

    /// Validate and build the backend request.
    pub fn request(&self) -> Result<Request> {
        self.validate()?;
        Ok(Request::Post {
            path: self.path(),
            body: self.body(),
        })
    }
}

/// Whether `id` can be interpolated into a URL path segment as-is.
pub fn is_path_safe(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && id != "."
        && id != ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_json() {
        let a: Action = serde_json::from_str(r#"{"kind":"soren-approve","id":"42"}"#).unwrap();
        assert_eq!(a, Action::SorenApprove { id: "42".into() });
        let b: Action = serde_json::from_str(r#"{"kind":"mercury-review-all"}"#).unwrap();
        assert_eq!(b, Action::MercuryReviewAll);
    }

    #[test]
    fn paths_follow_backend_routes() {
        assert_eq!(
            Action::SorenGenerate { id: "7".into() }.path(),
            "/api/soren/generate/7"
        );
        assert_eq!(
            Action::MercuryReview { id: "p1".into() }.path(),
            "/api/mercury/review/p1"
        );
        assert_eq!(Action::AtlasBackgroundStop.path(), "/api/atlas/background/stop");
    }

    #[test]
    fn blank_text_is_rejected_before_network() {
        assert!(Action::SentinelBug { text: "   ".into() }.request().is_err());
        assert!(
            Action::MercuryReply {
                id: "c1".into(),
                text: "\n".into()
            }
            .request()
            .is_err()
        );
        assert!(Action::SentinelBug { text: "boom".into() }.request().is_ok());
    }

    #[test]
    fn ids_must_be_path_safe() {
        assert!(Action::SorenApprove { id: "../x".into() }.validate().is_err());
        assert!(Action::SorenApprove { id: "".into() }.validate().is_err());
        assert!(Action::SorenApprove { id: "post_12.a".into() }.validate().is_ok());
    }

    #[test]
    fn reply_body_trims_text() {
        let body = Action::MercuryReply {
            id: "c9".into(),
            text: "  thanks!  ".into(),
        }
        .body();
        assert_eq!(body["text"], "thanks!");
        assert_eq!(body["id"], "c9");
    }
}
