//! Embedded HTML/CSS/JS shell for the fleet dashboard.
//!
//! The page carries no data of its own. Every panel is an empty region
//! container that the polling script fills from `/ui/regions`, so the
//! markup here only has to know the region ids.

use crate::model::Agent;
use crate::scheduler::{Tab, tab_regions};
use crate::scheduler::controller::ACTION_STATUS;

/// Assemble the single-page shell.
pub fn index_html() -> String {
    let mut tabs = String::new();
    let mut panels = String::new();
    for tab in Tab::ALL {
        let active = if tab == Tab::default() { " active" } else { "" };
        tabs.push_str(&format!(
            r#"<button class="tab{active}" data-tab="{key}">{label}</button>"#,
            key = tab.key(),
            label = tab_label(tab),
        ));

        panels.push_str(&format!(
            r#"<section class="panel{active}" id="panel-{}">"#,
            tab.key()
        ));
        match tab {
            Tab::Atlas => panels.push_str(&learning_select()),
            Tab::Chat => panels.push_str(&chat_form()),
            _ => {}
        }
        for region in tab_regions(tab) {
            panels.push_str(&format!(r#"<div class="region" id="{region}"></div>"#));
        }
        panels.push_str("</section>");
    }

    let mut html = String::with_capacity(HEAD.len() + SCRIPT.len() + panels.len() + 512);
    html.push_str(HEAD);
    html.push_str(&format!(r#"<nav class="tabs">{tabs}</nav>"#));
    html.push_str(&format!(
        r#"<div class="region status" id="{ACTION_STATUS}"></div>"#
    ));
    html.push_str(&panels);
    html.push_str("</div>");
    html.push_str(SCRIPT);
    html.push_str("</body></html>");
    html
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Overview => "Overview",
        Tab::Chat => "Chat",
        other => other.agent().map_or("Overview", Agent::name),
    }
}

fn agent_options(with_all: bool) -> String {
    let mut out = String::new();
    if with_all {
        out.push_str(r#"<option value="all">All agents</option>"#);
    }
    for agent in Agent::ALL {
        out.push_str(&format!(
            r#"<option value="{}">{}</option>"#,
            agent.key(),
            agent.name()
        ));
    }
    out
}

fn learning_select() -> String {
    format!(
        r#"<label class="picker">Learning feed <select id="learning-agent">{}</select></label>"#,
        agent_options(false)
    )
}

fn chat_form() -> String {
    format!(
        r#"<form id="chat-form" class="chat-form"><select id="chat-target">{}</select><input id="chat-input" type="text" autocomplete="off" placeholder="Message the fleet"><button class="btn" type="submit">Send</button></form>"#,
        agent_options(true)
    )
}

const HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Fleet Dashboard</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 1200px; margin: 0 auto; padding: 24px; }
header {
  display: flex;
  align-items: baseline;
  gap: 12px;
  margin-bottom: 16px;
  padding-bottom: 12px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 22px; font-weight: 600; }
header .subtitle { color: var(--text-muted); font-size: 13px; }

/* Tabs */
.tabs { display: flex; gap: 4px; margin-bottom: 16px; flex-wrap: wrap; }
.tab {
  background: none;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--text-muted);
  padding: 6px 14px;
  cursor: pointer;
  font: inherit;
}
.tab.active { color: var(--text); border-color: var(--accent); }
.panel { display: none; }
.panel.active { display: block; }
.region { margin-bottom: 16px; }
.region:empty { display: none; }
.status { min-height: 1.5em; font-family: var(--mono); font-size: 13px; }

/* Widgets */
section h3 { font-size: 15px; margin: 8px 0; }
.stats { display: flex; gap: 12px; flex-wrap: wrap; }
.stat {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 10px 14px;
  min-width: 120px;
}
.stat-label { color: var(--text-muted); font-size: 12px; }
.stat-value { font-size: 20px; font-weight: 600; }
table { width: 100%; border-collapse: collapse; }
th, td { text-align: left; padding: 6px 8px; border-bottom: 1px solid var(--border); }
th { color: var(--text-muted); font-weight: 500; font-size: 12px; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 12px; }
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 12px;
}
.card-title { font-weight: 600; }
.card-meta { color: var(--text-muted); font-size: 12px; }
.card-body { margin: 6px 0; white-space: pre-wrap; }
.buttons { display: flex; gap: 6px; flex-wrap: wrap; margin-top: 6px; }
.btn {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--accent);
  padding: 4px 10px;
  cursor: pointer;
  font: inherit;
  text-decoration: none;
}
.btn:disabled { opacity: 0.5; cursor: wait; }
.lines { font-family: var(--mono); font-size: 12px; white-space: pre-wrap; }
.text { white-space: pre-wrap; }
.progress { background: var(--border); border-radius: 4px; height: 8px; overflow: hidden; }
.progress-fill { background: var(--accent); height: 100%; }
.good { color: var(--green); }
.caution { color: var(--yellow); }
.bad { color: var(--red); }
.muted, .note { color: var(--text-muted); }
.error { color: var(--red); }

/* Radar */
.radar { display: block; margin: 0 auto; }
.radar-grid { fill: none; stroke: var(--border); }
.radar-spoke { stroke: var(--border); }
.radar-label { fill: var(--text-muted); font-size: 10px; }
.radar-center { fill: var(--text); font-weight: 600; }

/* Chat */
.chat-form { display: flex; gap: 8px; margin-bottom: 12px; }
.chat-form input {
  flex: 1;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--text);
  padding: 6px 10px;
  font: inherit;
}
select {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  color: var(--text);
  padding: 4px 8px;
  font: inherit;
}
.picker { display: block; margin-bottom: 12px; color: var(--text-muted); }
.chat-log { display: flex; flex-direction: column; gap: 6px; }
.chat-msg { background: var(--surface); border-radius: var(--radius); padding: 6px 10px; }
.chat-msg.typing { color: var(--text-muted); font-style: italic; }
.chat-who { font-weight: 600; margin-right: 8px; }
</style>
</head>
<body>
<div class="app">
<header><h1>Fleet Dashboard</h1><span class="subtitle">agent operations</span></header>
"##;

const SCRIPT: &str = r##"<script>
(function () {
  let since = 0;
  let tabPending = 0;
  let tabClicks = 0;

  function post(path, body) {
    return fetch(path, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: body === undefined ? '{}' : JSON.stringify(body),
    });
  }

  function showTab(key) {
    document.querySelectorAll('.tab').forEach(t =>
      t.classList.toggle('active', t.dataset.tab === key));
    document.querySelectorAll('.panel').forEach(p =>
      p.classList.toggle('active', p.id === 'panel-' + key));
  }

  async function poll() {
    try {
      const clicks = tabClicks;
      const resp = await fetch('/ui/regions?since=' + since);
      const data = await resp.json();
      for (const region of data.regions) {
        const el = document.getElementById(region.id);
        if (el) el.innerHTML = region.html;
      }
      since = data.version;
      if (tabPending === 0 && clicks === tabClicks) showTab(data.active_tab);
    } catch (e) {
      /* server restarting; keep polling */
    }
    setTimeout(poll, 500);
  }

  document.querySelectorAll('.tab').forEach(tab => {
    tab.addEventListener('click', () => {
      showTab(tab.dataset.tab);
      tabPending++;
      tabClicks++;
      post('/ui/tab/' + tab.dataset.tab).catch(() => {}).finally(() => { tabPending--; });
    });
  });

  document.addEventListener('click', async ev => {
    const btn = ev.target.closest('button[data-action]');
    if (!btn) return;
    const action = JSON.parse(btn.dataset.action);
    if (btn.dataset.prompt) {
      const text = window.prompt(btn.dataset.prompt);
      if (text === null || text.trim() === '') return;
      action.text = text;
    }
    btn.disabled = true;
    try {
      await post('/ui/action', action);
    } finally {
      btn.disabled = false;
    }
  });

  const form = document.getElementById('chat-form');
  form.addEventListener('submit', ev => {
    ev.preventDefault();
    const input = document.getElementById('chat-input');
    const message = input.value;
    if (message.trim() === '') return;
    input.value = '';
    post('/ui/chat', { message, agent: document.getElementById('chat-target').value });
  });

  document.getElementById('learning-agent').addEventListener('change', ev => {
    post('/ui/learning/' + ev.target.value);
  });

  poll();
})();
</script>
"##;
