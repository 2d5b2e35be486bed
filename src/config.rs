use std::fs;

use serde::Deserialize;
use tracing::{info, warn};

pub const DEFAULT_API_BASE: &str = "https://api.disneyapi.dev";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_SAMPLE_SIZE: usize = 3;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base: String,
    pub page: u32,
    pub sample_size: usize,
    pub data_dir: Option<String>,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page: DEFAULT_PAGE,
            sample_size: DEFAULT_SAMPLE_SIZE,
            data_dir: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    api_base: Option<String>,
    page: Option<u32>,
    sample_size: Option<usize>,
    data_dir: Option<String>,
    http_timeout_secs: Option<u64>,
}

pub fn load_config() -> AppConfig {
    match fs::read_to_string("config.json") {
        Ok(raw) => {
            let cfg = parse_config(&raw);
            info!("Loaded config.json");
            cfg
        }
        Err(_) => {
            info!("No config.json found; using defaults");
            AppConfig::default()
        }
    }
}

fn parse_config(raw: &str) -> AppConfig {
    let mut cfg = AppConfig::default();

    match serde_json::from_str::<RawConfig>(raw) {
        Ok(parsed) => {
            if let Some(base) = parsed.api_base {
                // trailing slashes break the request path join
                cfg.api_base = base.trim_end_matches('/').to_string();
            }
            if let Some(page) = parsed.page {
                cfg.page = page.max(1);
            }
            if let Some(n) = parsed.sample_size {
                cfg.sample_size = n.clamp(1, 24);
            }
            if parsed.data_dir.is_some() {
                cfg.data_dir = parsed.data_dir;
            }
            if let Some(secs) = parsed.http_timeout_secs {
                cfg.http_timeout_secs = secs.clamp(1, 120);
            }
        }
        Err(err) => {
            warn!("Failed to parse config.json ({}). Using defaults.", err);
        }
    }

    cfg
}

#[cfg(test)]
mod tests {
    use super::{parse_config, AppConfig, DEFAULT_API_BASE};

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let cfg = parse_config("{not json");
        assert_eq!(cfg.api_base, DEFAULT_API_BASE);
        assert_eq!(cfg.sample_size, AppConfig::default().sample_size);
    }

    #[test]
    fn partial_config_merges_over_defaults() {
        let cfg = parse_config(r#"{"sample_size": 5, "api_base": "https://example.test/"}"#);
        assert_eq!(cfg.api_base, "https://example.test");
        assert_eq!(cfg.sample_size, 5);
        assert_eq!(cfg.page, 1);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = parse_config(r#"{"page": 0, "sample_size": 999, "http_timeout_secs": 0}"#);
        assert_eq!(cfg.page, 1);
        assert_eq!(cfg.sample_size, 24);
        assert_eq!(cfg.http_timeout_secs, 1);
    }
}
