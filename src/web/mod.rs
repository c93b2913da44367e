//! Embedded operator UI for fleetdash.
//!
//! A sync HTTP server (via `tiny_http`) serves the single-page shell and the
//! `/ui/*` endpoints it polls. One event loop thread owns the
//! [`Controller`]; everything else talks to it over a channel:
//!
//! - the listener thread forwards each incoming request,
//! - worker threads run backend calls and send the outcome back,
//! - the loop's receive timeout drives the refresh timers.
//!
//! Launched via `fleetdash serve` (default: `http://127.0.0.1:7777`).

pub mod api;
pub mod frontend;

use std::io::Cursor;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::Value;
use tiny_http::{Header, Method, Request as HttpRequest, Response, Server, StatusCode};

use crate::analytics::logger::{ActivityKind, ActivityLog};
use crate::config::schema::DashConfig;
use crate::fetch::{HttpTransport, Transport};
use crate::scheduler::{Controller, Job, Ticket};
use api::Reply;

enum Event {
    Http(HttpRequest),
    Done {
        ticket: Ticket,
        result: Result<Value, String>,
    },
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server. Blocks the current thread.
pub fn serve(config: &DashConfig, addr_override: Option<String>, no_browser: bool) -> Result<()> {
    let addr = addr_override.unwrap_or_else(|| config.server.listen.clone());
    let server = Server::http(&addr)
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.backend.base_url));
    let log = ActivityLog::from_config(&config.logging);
    let (primary, intelligence) = config.refresh.periods();
    let mut controller = Controller::new(primary, intelligence, Instant::now())
        .with_chat_target(&config.chat.default_target);

    println!("fleetdash running at http://{addr}");
    println!("backend: {}", config.backend.base_url);
    println!("Press Ctrl+C to stop.\n");

    if config.server.open_browser && !no_browser {
        let _ = open_browser(&format!("http://{addr}"));
    }

    let (tx, rx) = mpsc::channel::<Event>();
    let listener_tx = tx.clone();
    thread::Builder::new()
        .name("http-listener".into())
        .spawn(move || {
            for request in server.incoming_requests() {
                if listener_tx.send(Event::Http(request)).is_err() {
                    break;
                }
            }
        })
        .context("failed to spawn listener thread")?;

    for job in controller.start() {
        spawn_job(job, &transport, &tx);
    }

    loop {
        let timeout = controller
            .next_deadline()
            .saturating_duration_since(Instant::now());
        let jobs = match rx.recv_timeout(timeout) {
            Ok(Event::Http(request)) => {
                handle_http(&mut controller, &log, &transport, request, config.logging.access_log)
            }
            Ok(Event::Done { ticket, result }) => {
                log_delivery(&log, &ticket, &result);
                controller.deliver(ticket, result)
            }
            Err(RecvTimeoutError::Timeout) => controller.poll_timers(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => break,
        };
        for job in jobs {
            spawn_job(job, &transport, &tx);
        }
    }

    Ok(())
}

/// Run one backend call off the event loop.
fn spawn_job(job: Job, transport: &Arc<dyn Transport>, tx: &Sender<Event>) {
    let transport = Arc::clone(transport);
    let tx = tx.clone();
    thread::spawn(move || {
        let result = job
            .request
            .execute(&*transport)
            .map_err(|e| format!("{e:#}"));
        let _ = tx.send(Event::Done {
            ticket: job.ticket,
            result,
        });
    });
}

fn log_delivery(log: &ActivityLog, ticket: &Ticket, result: &Result<Value, String>) {
    match (ticket, result) {
        (Ticket::Action(action), _) => log.record(
            ActivityKind::Action,
            &action.label(),
            result.is_ok(),
            result.as_ref().err().map(String::as_str),
        ),
        (Ticket::ChatSend(_), Err(msg)) => {
            log.record(ActivityKind::ChatSend, "send", false, Some(msg));
        }
        (_, Err(msg)) => {
            log.record(ActivityKind::FetchFailure, &ticket.describe(), false, Some(msg));
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Request handling
// ---------------------------------------------------------------------------

fn handle_http(
    controller: &mut Controller,
    log: &ActivityLog,
    transport: &Arc<dyn Transport>,
    mut request: HttpRequest,
    access_log: bool,
) -> Vec<Job> {
    let method = request.method().clone();
    let url = request.url().to_string();

    let body = if matches!(method, Method::Put | Method::Post | Method::Patch) {
        let mut buf = String::new();
        let _ = request.as_reader().read_to_string(&mut buf);
        Some(buf)
    } else {
        None
    };

    if access_log {
        println!(
            "{} {} {}",
            method,
            url,
            chrono::Local::now().format("%H:%M:%S")
        );
    }

    match api::handle(controller, log, method.as_str(), &url, body.as_deref()) {
        Ok(outcome) => {
            match outcome.reply {
                Reply::Json(status, value) => {
                    let _ = request.respond(json_response(status, &value));
                }
                Reply::Html(html) => {
                    let resp = Response::from_data(html.into_bytes())
                        .with_status_code(StatusCode(200));
                    let resp = with_header(resp, "Content-Type", "text/html; charset=utf-8");
                    let _ = request.respond(resp);
                }
                Reply::Download(path) => proxy_download(request, transport, path),
            }
            outcome.jobs
        }
        Err(e) => {
            let value = serde_json::json!({ "error": format!("{e:#}") });
            let _ = request.respond(json_response(500, &value));
            Vec::new()
        }
    }
}

/// Stream a backend file to the browser from its own thread.
fn proxy_download(request: HttpRequest, transport: &Arc<dyn Transport>, path: String) {
    let transport = Arc::clone(transport);
    thread::spawn(move || {
        let resp = match transport.download(&path) {
            Ok(file) => {
                let mut resp = with_header(
                    Response::from_data(file.bytes),
                    "Content-Type",
                    &file.content_type,
                );
                if let Some(disposition) = &file.disposition {
                    resp = with_header(resp, "Content-Disposition", disposition);
                }
                resp
            }
            Err(e) => json_response(502, &serde_json::json!({ "error": format!("{e:#}") })),
        };
        let _ = request.respond(resp);
    });
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn json_response(status: u16, value: &Value) -> Response<Cursor<Vec<u8>>> {
    let resp = Response::from_data(value.to_string().into_bytes())
        .with_status_code(StatusCode(status));
    with_header(resp, "Content-Type", "application/json; charset=utf-8")
}

/// Add a header, skipping values `tiny_http` rejects.
fn with_header(
    resp: Response<Cursor<Vec<u8>>>,
    name: &str,
    value: &str,
) -> Response<Cursor<Vec<u8>>> {
    match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
        Ok(header) => resp.with_header(header),
        Err(()) => resp,
    }
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_header_values_are_skipped() {
        let resp = Response::from_data(Vec::new());
        let resp = with_header(resp, "Content-Type", "text/plain");
        assert_eq!(resp.headers().len(), 1);
        let resp = with_header(resp, "Content-Disposition", "attachment; filename=\"café.csv\"");
        assert_eq!(resp.headers().len(), 1);
    }
}
