//! Operator request handlers.
//!
//! Handlers run on the event loop thread with the controller borrowed
//! mutably. They never block: backend work comes back as [`Job`]s for the
//! caller to spawn, and file downloads are handed off as a backend path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::actions::{Action, is_path_safe};
use crate::analytics::logger::{ActivityKind, ActivityLog};
use crate::model::Agent;
use crate::scheduler::{Controller, Job, Tab};
use crate::view::RegionUpdate;

/// What to send back to the browser.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Json(u16, Value),
    Html(String),
    /// Stream this backend file to the client.
    Download(String),
}

#[derive(Debug)]
pub struct Outcome {
    pub reply: Reply,
    pub jobs: Vec<Job>,
}

impl Outcome {
    fn reply(reply: Reply) -> Self {
        Self {
            reply,
            jobs: Vec::new(),
        }
    }

    fn ok(jobs: Vec<Job>) -> Self {
        Self {
            reply: Reply::Json(200, json!({ "ok": true })),
            jobs,
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::reply(Reply::Json(400, json!({ "error": message.into() })))
    }
}

#[derive(Serialize)]
struct RegionsResponse {
    version: u64,
    active_tab: String,
    regions: Vec<RegionUpdate>,
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default)]
    agent: Option<String>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Route one operator request. `Err` becomes a 500 response.
pub fn handle(
    controller: &mut Controller,
    log: &ActivityLog,
    method: &str,
    url: &str,
    body: Option<&str>,
) -> Result<Outcome> {
    let path = url.split('?').next().unwrap_or(url);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let outcome = match (method, segments.as_slice()) {
        ("GET", [""] | ["index.html"]) => Outcome::reply(Reply::Html(super::frontend::index_html())),
        ("GET", ["ui", "regions"]) => regions(controller, url)?,
        ("POST", ["ui", "tab", tab]) => select_tab(controller, log, tab),
        ("POST", ["ui", "action"]) => action(controller, log, body.unwrap_or("{}")),
        ("POST", ["ui", "chat"]) => chat(controller, log, body.unwrap_or("{}")),
        ("POST", ["ui", "learning", agent]) => match agent.parse::<Agent>() {
            Ok(agent) => Outcome::ok(controller.set_learning_agent(agent)),
            Err(err) => Outcome::bad_request(err.to_string()),
        },
        ("GET", ["files", "soren", kind @ ("download" | "preview"), id]) => {
            if is_path_safe(id) {
                Outcome::reply(Reply::Download(format!("/api/soren/{kind}/{id}")))
            } else {
                Outcome::bad_request(format!("invalid id: {id:?}"))
            }
        }
        ("GET", ["files", "shelby", "export"]) => Outcome::reply(Reply::Download(
            "/api/shelby/export?format=csv".to_string(),
        )),
        _ => Outcome::reply(Reply::Json(404, json!({ "error": "not found" }))),
    };
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /ui/regions?since=N`
fn regions(controller: &Controller, url: &str) -> Result<Outcome> {
    let since = parse_since_param(url).unwrap_or(0);
    let view = controller.view();
    let resp = RegionsResponse {
        version: view.version(),
        active_tab: controller.state().active_tab.to_string(),
        regions: view.changed_since(since),
    };
    let value = serde_json::to_value(resp).context("failed to serialize regions")?;
    Ok(Outcome::reply(Reply::Json(200, value)))
}

/// `POST /ui/tab/{tab}`
fn select_tab(controller: &mut Controller, log: &ActivityLog, tab: &str) -> Outcome {
    match tab.parse::<Tab>() {
        Ok(tab) => {
            log.record(ActivityKind::TabSwitch, tab.key(), true, None);
            Outcome::ok(controller.select_tab(tab))
        }
        Err(err) => Outcome::bad_request(err.to_string()),
    }
}

/// `POST /ui/action`
fn action(controller: &mut Controller, log: &ActivityLog, body: &str) -> Outcome {
    let action: Action = match serde_json::from_str(body) {
        Ok(action) => action,
        Err(err) => return Outcome::bad_request(format!("invalid action: {err}")),
    };
    let label = action.label();
    match controller.dispatch_action(action) {
        Ok(jobs) => Outcome::ok(jobs),
        Err(err) => {
            let message = format!("{err:#}");
            log.record(ActivityKind::Action, &label, false, Some(&message));
            Outcome::bad_request(message)
        }
    }
}

/// `POST /ui/chat`
fn chat(controller: &mut Controller, log: &ActivityLog, body: &str) -> Outcome {
    let req: ChatRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(err) => return Outcome::bad_request(format!("invalid chat request: {err}")),
    };
    let jobs = controller.send_chat(&req.message, req.agent.as_deref());
    if jobs.is_empty() {
        return Outcome::bad_request("message must not be empty");
    }
    let target = req.agent.as_deref().unwrap_or("default");
    log.record(ActivityKind::ChatSend, target, true, None);
    Outcome::ok(jobs)
}

fn parse_since_param(url: &str) -> Option<u64> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == "since" { v.parse().ok() } else { None }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn controller() -> Controller {
        Controller::new(Duration::from_secs(5), Duration::from_secs(30), Instant::now())
    }

    fn call(c: &mut Controller, method: &str, url: &str, body: Option<&str>) -> Outcome {
        handle(c, &ActivityLog::disabled(), method, url, body).unwrap()
    }

    #[test]
    fn since_param_parsing() {
        assert_eq!(parse_since_param("/ui/regions?since=12"), Some(12));
        assert_eq!(parse_since_param("/ui/regions?x=1&since=3"), Some(3));
        assert_eq!(parse_since_param("/ui/regions"), None);
    }

    #[test]
    fn tab_route_switches_and_fetches() {
        let mut c = controller();
        let out = call(&mut c, "POST", "/ui/tab/mercury", None);
        assert_eq!(out.reply, Reply::Json(200, json!({"ok": true})));
        assert_eq!(out.jobs.len(), Tab::Mercury.sources(Agent::Garves).len());
        assert_eq!(c.state().active_tab, Tab::Mercury);
    }

    #[test]
    fn unknown_tab_is_bad_request() {
        let mut c = controller();
        let out = call(&mut c, "POST", "/ui/tab/settings", None);
        assert!(matches!(out.reply, Reply::Json(400, _)));
        assert!(out.jobs.is_empty());
    }

    #[test]
    fn blank_chat_is_rejected_without_jobs() {
        let mut c = controller();
        let out = call(&mut c, "POST", "/ui/chat", Some(r#"{"message":"   "}"#));
        assert!(matches!(out.reply, Reply::Json(400, _)));
        assert!(out.jobs.is_empty());
    }

    #[test]
    fn action_route_parses_tagged_body() {
        let mut c = controller();
        let out = call(
            &mut c,
            "POST",
            "/ui/action",
            Some(r#"{"kind":"soren-generate","id":"12"}"#),
        );
        assert_eq!(out.jobs.len(), 1);
        assert_eq!(out.jobs[0].request.path(), "/api/soren/generate/12");
    }

    #[test]
    fn regions_reports_versioned_updates() {
        let mut c = controller();
        let out = call(&mut c, "GET", "/ui/regions?since=0", None);
        let Reply::Json(200, body) = out.reply else {
            panic!("expected json");
        };
        assert_eq!(body["active_tab"], "overview");
        assert!(body["regions"].as_array().is_some_and(|r| !r.is_empty()));

        let version = body["version"].as_u64().unwrap();
        let out = call(&mut c, "GET", &format!("/ui/regions?since={version}"), None);
        let Reply::Json(_, body) = out.reply else {
            panic!("expected json");
        };
        assert_eq!(body["regions"], json!([]));
    }

    #[test]
    fn downloads_map_to_backend_paths() {
        let mut c = controller();
        let out = call(&mut c, "GET", "/files/soren/preview/abc", None);
        assert_eq!(out.reply, Reply::Download("/api/soren/preview/abc".into()));
        let out = call(&mut c, "GET", "/files/shelby/export", None);
        assert_eq!(
            out.reply,
            Reply::Download("/api/shelby/export?format=csv".into())
        );
        let out = call(&mut c, "GET", "/files/soren/download/..", None);
        assert!(matches!(out.reply, Reply::Json(400, _)));
    }

    #[test]
    fn unknown_path_is_404() {
        let mut c = controller();
        let out = call(&mut c, "GET", "/nope", None);
        assert_eq!(out.reply, Reply::Json(404, json!({"error": "not found"})));
    }
}
