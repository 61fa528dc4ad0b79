use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// When set, data is served from this JSON file instead of `base_url`.
    pub fixture: Option<String>,
    pub page_size: usize,
    pub latency_ms: u64,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            fixture: None,
            page_size: 5,
            latency_ms: 0,
            log_file: "dashboard_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn source_label(&self) -> String {
        match &self.fixture {
            Some(path) => format!("fixture {path}"),
            None => self.base_url.clone(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "dashboard_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Serve data from a JSON fixture instead of the HTTP API.
    #[arg(long)]
    fixture: Option<String>,
    /// Fixture page size.
    #[arg(long)]
    page_size: Option<usize>,
    /// Artificial fixture latency in milliseconds.
    #[arg(long)]
    latency_ms: Option<u64>,
    /// Log file path (the terminal is taken by the UI).
    #[arg(long)]
    log_file: Option<String>,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    resolve(Args::parse())
}

fn resolve(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("DASHBOARD_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(fixture) = args.fixture {
        settings.fixture = Some(fixture);
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if let Some(latency_ms) = args.latency_ms {
        settings.latency_ms = latency_ms;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["dashboard_tui", "--config", "does/not/exist.toml"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let settings = resolve(args(&[])).unwrap();
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.latency_ms, 0);
        assert!(settings.fixture.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let settings = resolve(args(&[
            "--base-url",
            "http://example.test:8080",
            "--fixture",
            "data/demo.json",
            "--latency-ms",
            "250",
            "--log-level",
            "debug",
        ]))
        .unwrap();

        assert_eq!(settings.base_url, "http://example.test:8080");
        assert_eq!(settings.fixture.as_deref(), Some("data/demo.json"));
        assert_eq!(settings.latency_ms, 250);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.source_label(), "fixture data/demo.json");
    }
}
