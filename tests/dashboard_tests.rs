/// End-to-end dashboard tests against a scripted backend.
///
/// Covers the refresh scheduler, failure policies, intelligence caching,
/// chat sends and the radar engine through the public `fleetdash` API.
/// No network: every backend call goes through `ScriptedBackend`.
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use serde_json::{Value, json};

use fleetdash::fetch::{Download, Source, Transport};
use fleetdash::model::Agent;
use fleetdash::radar::{MIN_SCORE, RadarChart};
use fleetdash::render;
use fleetdash::scheduler::{Controller, Tab, intelligence_job, run_jobs};
use fleetdash::utils::format::{format_percent, win_rate_color};

// ---------------------------------------------------------------------------
// Scripted transport
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ScriptedBackend {
    responses: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn with(mut self, path: &str, value: Value) -> Self {
        self.responses.insert(path.to_string(), value);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, method: &str, path: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(format!("{method} {path}"));
        self.responses
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("HTTP 503 for {path}"))
    }
}

impl Transport for ScriptedBackend {
    fn get_json(&self, path: &str) -> Result<Value> {
        self.answer("GET", path)
    }

    fn post_json(&self, path: &str, _body: &Value) -> Result<Value> {
        self.answer("POST", path)
    }

    fn download(&self, path: &str) -> Result<Download> {
        Err(anyhow!("no file at {path}"))
    }
}

fn controller() -> Controller {
    Controller::new(Duration::from_secs(5), Duration::from_secs(30), Instant::now())
}

fn report() -> Value {
    json!({
        "team": {"overall": 82, "dimensions": {"speed": 80, "accuracy": 90}},
        "garves": {"overall": 70, "title": "Market Brain",
                   "dimensions": {"edge": 60, "risk": 75, "timing": 80}}
    })
}

// ---------------------------------------------------------------------------
// Radar engine
// ---------------------------------------------------------------------------

#[test]
fn radar_has_one_axis_and_vertex_per_score() {
    for n in 3..=9 {
        let values: Vec<f64> = (0..n).map(|i| (i * 11) as f64).collect();
        let g = RadarChart::new(200.0, &values, "#fff").geometry();
        assert_eq!(g.angles.len(), n);
        assert_eq!(g.markers.len(), n);
        assert_eq!(g.polygon.len(), n + 1);
        assert_eq!(g.polygon.first(), g.polygon.last());
    }
}

#[test]
fn radar_clamps_out_of_range_scores() {
    let values = [0.0, 250.0, 50.0];
    let g = RadarChart::new(200.0, &values, "#fff").geometry();
    let dist = |i: usize| {
        let p = g.markers[i];
        ((p.x - g.center.x).powi(2) + (p.y - g.center.y).powi(2)).sqrt()
    };
    assert!((dist(0) - g.radius * MIN_SCORE / 100.0).abs() < 1e-9);
    assert!((dist(1) - g.radius).abs() < 1e-9);
}

// ---------------------------------------------------------------------------
// Render pipeline
// ---------------------------------------------------------------------------

#[test]
fn rendering_is_idempotent_for_every_source() {
    let payload = json!({
        "wins": 4, "losses": 2, "queue": [{"id": "1", "caption": "hi"}],
        "alerts": [{"severity": "high", "message": "disk"}], "lines": ["a"]
    });
    let mut sources = vec![Source::Overview];
    for tab in Tab::ALL {
        sources.extend(tab.sources(Agent::Atlas));
    }
    for source in sources {
        assert_eq!(
            render::render_source(source, &payload),
            render::render_source(source, &payload),
            "{source:?}"
        );
    }
}

#[test]
fn backend_text_is_escaped() {
    let payload = json!({"queue": [{"id": "7", "title": "<script>alert(1)</script>"}]});
    let html = render::render_source(Source::Primary(Agent::Soren), &payload);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn win_rate_formatting_and_tiers() {
    assert_eq!(format_percent(3.0, 1.0), "75.0%");
    assert_eq!(format_percent(0.0, 0.0), "--");
    assert_eq!(win_rate_color(50.0), "good");
    assert_eq!(win_rate_color(45.0), "caution");
    assert_eq!(win_rate_color(10.0), "bad");
}

// ---------------------------------------------------------------------------
// Scheduler against the scripted backend
// ---------------------------------------------------------------------------

#[test]
fn tab_switch_fetches_each_source_exactly_once() {
    let backend = ScriptedBackend::default();
    let mut c = controller();
    let jobs = c.select_tab(Tab::Shelby);
    run_jobs(&mut c, &backend, jobs);

    let mut calls = backend.calls();
    let expected = Tab::Shelby.sources(Agent::Garves).len();
    assert_eq!(calls.len(), expected);
    calls.sort();
    calls.dedup();
    assert_eq!(calls.len(), expected);
}

#[test]
fn cached_meter_renders_before_any_fetch() {
    let backend = ScriptedBackend::default().with("/api/intelligence", report());
    let mut c = controller();
    run_jobs(&mut c, &backend, vec![intelligence_job()]);

    let jobs = c.select_tab(Tab::Garves);
    // The meter is already on screen while the refresh jobs are still pending.
    let meter = c.view().get("garves-intel").unwrap();
    assert!(meter.contains("<svg"));
    assert!(meter.contains("Market Brain"));
    assert!(!jobs.is_empty());
    assert_eq!(backend.calls(), vec!["GET /api/intelligence"]);
}

#[test]
fn team_panel_labels_expert_with_two_axes() {
    let backend = ScriptedBackend::default().with("/api/intelligence", report());
    let mut c = controller();
    run_jobs(&mut c, &backend, vec![intelligence_job()]);

    let team = c.view().get("overview-team").unwrap();
    assert!(team.contains("EXPERT"));
    assert_eq!(team.matches(r#"class="radar-spoke""#).count(), 2);
    assert!(team.contains(">Speed<"));
    assert!(team.contains(">Accuracy<"));
}

#[test]
fn failure_policies_per_region() {
    // Primary endpoint down, secondary endpoint down: only the primary shows it.
    let backend = ScriptedBackend::default().with("/api/garves/regime", json!({"label": "bear"}));
    let mut c = controller();
    let jobs = c.select_tab(Tab::Garves);
    run_jobs(&mut c, &backend, jobs);

    assert!(c.view().get("garves-trades").unwrap().contains("Error: HTTP 503"));
    assert_eq!(c.view().get("garves-logs"), Some(""));
    assert!(c.view().get("garves-regime").unwrap().contains("BEAR"));
}

#[test]
fn blank_chat_never_reaches_backend() {
    let backend = ScriptedBackend::default();
    let mut c = controller();
    let jobs = c.send_chat("   \n", None);
    assert!(jobs.is_empty());
    run_jobs(&mut c, &backend, jobs);
    assert!(backend.calls().is_empty());
}

#[test]
fn chat_send_posts_and_shows_history() {
    let backend = ScriptedBackend::default().with(
        "/api/chat",
        json!({"messages": [
            {"role": "user", "content": "status?"},
            {"agent": "shelby", "content": "all green"}
        ]}),
    );
    let mut c = controller();
    let jobs = c.send_chat("status?", Some("shelby"));
    run_jobs(&mut c, &backend, jobs);

    assert_eq!(backend.calls(), vec!["POST /api/chat"]);
    let log = c.view().get("chat-log").unwrap();
    assert!(log.contains("all green"));
    assert!(!log.contains("typing"));
}

#[test]
fn action_outcome_then_refresh() {
    let backend = ScriptedBackend::default()
        .with("/api/sentinel/scan", Value::Null)
        .with("/api/sentinel", json!({"agents": []}));
    let mut c = controller();
    c.select_tab(Tab::Sentinel);
    let jobs = c
        .dispatch_action(fleetdash::actions::Action::SentinelScan)
        .unwrap();
    run_jobs(&mut c, &backend, jobs);

    let calls = backend.calls();
    assert_eq!(calls[0], "POST /api/sentinel/scan");
    assert!(calls.contains(&"GET /api/sentinel".to_string()));
    assert!(c.view().get("action-status").unwrap().contains("ok: health scan"));
}
