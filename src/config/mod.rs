/// Configuration system for fleetdash.
///
/// Layered, later layers win at the field level:
///
/// 1. **Built-in defaults**: [`schema::DashConfig::default()`]
/// 2. **User global config**: `~/.fleetdash/config.toml`
/// 3. **Project local config**: `.fleetdash.toml` in the working directory
/// 4. **Environment variables**: `FLEETDASH_*` overrides
///
/// Malformed files are skipped; the dashboard always starts.
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::DashConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

pub fn load() -> DashConfig {
    let mut layers = Vec::new();
    if let Some(global) = load_toml_file(global_config_path()) {
        layers.push(global);
    }
    if let Some(project) = load_toml_file(project_config_path()) {
        layers.push(project);
    }
    let mut config = merge_layers(layers);
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

fn load_toml_file(path: Option<PathBuf>) -> Option<toml::Value> {
    let content = fs::read_to_string(path?).ok()?;
    toml::from_str(&content).ok()
}

/// Merge raw TOML layers key by key over the defaults.
///
/// Layers are merged as untyped tables so a project file that sets one key
/// does not reset keys the global file set. A value the schema rejects is
/// dropped on its own; the rest of its layer still applies.
fn merge_layers(layers: Vec<toml::Value>) -> DashConfig {
    let mut merged = toml::Value::Table(toml::map::Map::new());
    for layer in layers {
        merge_checked(&mut merged, &mut Vec::new(), layer);
    }
    merged.try_into().unwrap_or_default()
}

fn merge_checked(merged: &mut toml::Value, path: &mut Vec<String>, overlay: toml::Value) {
    match overlay {
        toml::Value::Table(table) => {
            for (key, value) in table {
                path.push(key);
                merge_checked(merged, path, value);
                path.pop();
            }
        }
        leaf => {
            let mut candidate = merged.clone();
            set_path(&mut candidate, path, leaf);
            let valid: Result<DashConfig, _> = candidate.clone().try_into();
            if valid.is_ok() {
                *merged = candidate;
            }
        }
    }
}

fn set_path(root: &mut toml::Value, path: &[String], value: toml::Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut slot = root;
    for key in parents {
        if !slot.is_table() {
            *slot = toml::Value::Table(toml::map::Map::new());
        }
        let toml::Value::Table(table) = slot else {
            return;
        };
        slot = table
            .entry(key.clone())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }
    if let toml::Value::Table(table) = slot {
        table.insert(last.clone(), value);
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

fn fleetdash_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".fleetdash"))
}

fn global_config_path() -> Option<PathBuf> {
    fleetdash_dir().map(|dir| dir.join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".fleetdash.toml"))
}

pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Supported variables:
/// - `FLEETDASH_LISTEN`: UI bind address
/// - `FLEETDASH_BACKEND_URL`: agent backend base URL
/// - `FLEETDASH_PRIMARY_MS`, `FLEETDASH_INTELLIGENCE_MS`: timer periods
/// - `FLEETDASH_LOGGING`: activity log switch (`1`/`true`/`yes`/`on`)
/// - `FLEETDASH_OPEN_BROWSER`: browser launch switch
fn apply_env_overrides(config: &mut DashConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(val) = var("FLEETDASH_LISTEN")
        && !val.is_empty()
    {
        config.server.listen = val;
    }
    if let Some(val) = var("FLEETDASH_BACKEND_URL")
        && !val.is_empty()
    {
        config.backend.base_url = val;
    }
    if let Some(val) = var("FLEETDASH_PRIMARY_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.refresh.primary_ms = ms;
    }
    if let Some(val) = var("FLEETDASH_INTELLIGENCE_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.refresh.intelligence_ms = ms;
    }
    if let Some(val) = var("FLEETDASH_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
    if let Some(val) = var("FLEETDASH_OPEN_BROWSER") {
        config.server.open_browser = is_truthy(&val);
    }
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to `~/.fleetdash/config.toml`.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.fleetdash/ directory")?;
    }
    fs::write(&path, DashConfig::default_toml()).context("failed to write config file")?;
    Ok(path)
}

/// Set one dotted key (e.g. `refresh.primary_ms`) in the global config file.
///
/// Starts from the defaults when no file exists yet.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let mut root: toml::Value = if path.exists() {
        let content = fs::read_to_string(&path).context("failed to read config file")?;
        toml::from_str(&content).context("failed to parse config as TOML value")?
    } else {
        toml::Value::try_from(DashConfig::default()).context("failed to serialize defaults")?
    };

    set_toml_value(&mut root, key, value)?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;
    Ok(())
}

/// Set a value in a TOML tree by dotted key, keeping the existing type.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section, leaf)) = key.rsplit_once('.') else {
        anyhow::bail!("config key must be <section>.<name>, got '{key}'");
    };

    let mut current = root;
    for part in section.split('.') {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }
    let table = current
        .as_table_mut()
        .with_context(|| format!("expected table at '{section}'"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key '{key}'"),
    };
    table.insert(leaf.to_string(), new_value);
    Ok(())
}

pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The fully resolved config as TOML.
pub fn show_effective_config() -> Result<String> {
    toml::to_string_pretty(&load()).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn project_layer_overrides_only_its_keys() {
        let config = merge_layers(vec![
            layer("[server]\nlisten = \"0.0.0.0:9000\"\n[refresh]\nprimary_ms = 1000\n"),
            layer("[refresh]\nprimary_ms = 2000\n"),
        ]);
        assert_eq!(config.server.listen, "0.0.0.0:9000");
        assert_eq!(config.refresh.primary_ms, 2000);
        assert_eq!(config.refresh.intelligence_ms, 30000);
    }

    #[test]
    fn wrong_typed_layer_falls_back_to_defaults() {
        let config = merge_layers(vec![layer("[refresh]\nprimary_ms = \"fast\"\n")]);
        assert_eq!(config, DashConfig::default());
    }

    #[test]
    fn bad_value_drops_alone() {
        let config = merge_layers(vec![
            layer("[server]\nlisten = \"0.0.0.0:9000\"\n"),
            layer("[refresh]\nprimary_ms = \"fast\"\nintelligence_ms = 60000\n"),
        ]);
        assert_eq!(config.server.listen, "0.0.0.0:9000");
        assert_eq!(config.refresh.primary_ms, 5000);
        assert_eq!(config.refresh.intelligence_ms, 60000);
    }

    #[test]
    fn env_overrides_win() {
        let mut config = DashConfig::default();
        apply_env_overrides(&mut config, |key| match key {
            "FLEETDASH_BACKEND_URL" => Some("http://10.0.0.2:8877".into()),
            "FLEETDASH_PRIMARY_MS" => Some("2500".into()),
            "FLEETDASH_INTELLIGENCE_MS" => Some("soon".into()),
            "FLEETDASH_OPEN_BROWSER" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config.backend.base_url, "http://10.0.0.2:8877");
        assert_eq!(config.refresh.primary_ms, 2500);
        assert_eq!(config.refresh.intelligence_ms, 30000);
        assert!(!config.server.open_browser);
    }

    #[test]
    fn is_truthy_accepts_variants() {
        for yes in ["1", "true", "TRUE", "yes", "on"] {
            assert!(is_truthy(yes));
        }
        for no in ["0", "false", "no", "off", ""] {
            assert!(!is_truthy(no));
        }
    }

    #[test]
    fn set_toml_value_keeps_types() {
        let mut root = layer("[refresh]\nprimary_ms = 5000\n[server]\nopen_browser = true\n");
        set_toml_value(&mut root, "refresh.primary_ms", "1500").unwrap();
        set_toml_value(&mut root, "server.open_browser", "off").unwrap();
        assert_eq!(root["refresh"]["primary_ms"].as_integer(), Some(1500));
        assert_eq!(root["server"]["open_browser"].as_bool(), Some(false));
        assert!(set_toml_value(&mut root, "refresh.primary_ms", "fast").is_err());
    }

    #[test]
    fn set_toml_value_rejects_unknown_keys() {
        let mut root = layer("[server]\nlisten = \"x\"\n");
        assert!(set_toml_value(&mut root, "nonexistent.key", "v").is_err());
        assert!(set_toml_value(&mut root, "server.port", "1").is_err());
        assert!(set_toml_value(&mut root, "listen", "1").is_err());
    }

    #[test]
    fn expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/tmp/a.jsonl"), PathBuf::from("/tmp/a.jsonl"));
    }
}
