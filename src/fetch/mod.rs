//! Data fetch layer: thin request wrappers over the agent backend.
//!
//! Uses the synchronous `ureq` client. There is no retry and
//! no backoff here: the next scheduler tick is the retry. Callers decide per
//! region what a failure looks like.

pub mod source;

use std::io::Read;

use anyhow::{Context, Result};
use serde_json::Value;

pub use source::{FailurePolicy, Source};

/// Largest file the download proxy will buffer.
const MAX_DOWNLOAD_BYTES: u64 = 64 * 1024 * 1024;

/// One backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Get(String),
    Post { path: String, body: Value },
}

impl Request {
    pub fn path(&self) -> &str {
        match self {
            Self::Get(path) | Self::Post { path, .. } => path,
        }
    }

    pub fn execute(&self, transport: &dyn Transport) -> Result<Value> {
        match self {
            Self::Get(path) => transport.get_json(path),
            Self::Post { path, body } => transport.post_json(path, body),
        }
    }
}

/// A non-JSON file fetched from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub content_type: String,
    pub disposition: Option<String>,
    pub bytes: Vec<u8>,
}

/// Backend access. Implemented over HTTP in production and scripted in tests.
pub trait Transport: Send + Sync {
    fn get_json(&self, path: &str) -> Result<Value>;
    fn post_json(&self, path: &str, body: &Value) -> Result<Value>;
    fn download(&self, path: &str) -> Result<Download>;
}

/// `ureq`-backed transport against one base URL.
///
/// No request timeout is configured; a hung call only occupies its own
/// worker thread.
pub struct HttpTransport {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        // "localhost" may resolve to ::1 first when the backend only binds IPv4.
        format!("{}{}", self.base_url, path).replace("://localhost", "://127.0.0.1")
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, path: &str) -> Result<Value> {
        let resp = self
            .agent
            .get(&self.url(path))
            .call()
            .with_context(|| format!("GET {path} failed"))?;
        parse_body(resp, path)
    }

    fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let resp = self
            .agent
            .post(&self.url(path))
            .send_json(body)
            .with_context(|| format!("POST {path} failed"))?;
        parse_body(resp, path)
    }

    fn download(&self, path: &str) -> Result<Download> {
        let resp = self
            .agent
            .get(&self.url(path))
            .call()
            .with_context(|| format!("GET {path} failed"))?;

        let content_type = resp.content_type().to_string();
        let disposition = resp.header("Content-Disposition").map(str::to_string);
        let mut bytes = Vec::new();
        resp.into_reader()
            .take(MAX_DOWNLOAD_BYTES)
            .read_to_end(&mut bytes)
            .with_context(|| format!("failed reading {path}"))?;

        Ok(Download {
            content_type,
            disposition,
            bytes,
        })
    }
}

/// Action endpoints may answer with an empty body.
fn parse_body(resp: ureq::Response, path: &str) -> Result<Value> {
    let text = resp
        .into_string()
        .with_context(|| format!("failed reading response from {path}"))?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).with_context(|| format!("invalid JSON from {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_strips_trailing_slash() {
        let t = HttpTransport::new("http://127.0.0.1:8877/");
        assert_eq!(t.base_url(), "http://127.0.0.1:8877");
        assert_eq!(t.url("/api/overview"), "http://127.0.0.1:8877/api/overview");
    }

    #[test]
    fn transport_pins_localhost_to_ipv4() {
        let t = HttpTransport::new("http://localhost:8877");
        assert_eq!(t.url("/api/logs"), "http://127.0.0.1:8877/api/logs");
    }

    #[test]
    fn request_path_covers_both_methods() {
        assert_eq!(Request::Get("/api/soren".into()).path(), "/api/soren");
        let post = Request::Post {
            path: "/api/sentinel/scan".into(),
            body: Value::Null,
        };
        assert_eq!(post.path(), "/api/sentinel/scan");
    }
}
