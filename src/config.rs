use std::{env, fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";
pub const DEFAULT_PAGE_TITLE: &str = "Gestion de Films";
pub const API_URL_ENV: &str = "FILMS_API_URL";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Collection endpoint; always ends with `/`.
    pub api_base_url: String,
    /// `None` means requests never time out.
    pub request_timeout: Option<Duration>,
    pub page_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            page_title: DEFAULT_PAGE_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(alias = "api_url")]
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    page_title: Option<String>,
}

/// Ensure the base URL ends with a slash so `{base}{id}/` addresses an item.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

/// `config.json` from the working directory, then environment overrides.
pub fn load_config() -> AppConfig {
    let mut cfg = load_config_from(Path::new(CONFIG_FILE));
    if let Ok(url) = env::var(API_URL_ENV) {
        apply_api_url_override(&mut cfg, &url);
    }
    cfg
}

fn apply_api_url_override(cfg: &mut AppConfig, url: &str) {
    if url.trim().is_empty() {
        warn!("{API_URL_ENV} is set but empty; keeping {}", cfg.api_base_url);
        return;
    }
    cfg.api_base_url = normalize_base_url(url);
    info!("API base overridden by {API_URL_ENV}: {}", cfg.api_base_url);
}

pub fn load_config_from(cfg_path: &Path) -> AppConfig {
    let mut cfg = AppConfig::default();

    match fs::read_to_string(cfg_path) {
        Ok(raw) => match serde_json::from_str::<RawConfig>(&raw) {
            Ok(parsed) => {
                if let Some(url) = parsed.api_base_url.filter(|u| !u.trim().is_empty()) {
                    cfg.api_base_url = normalize_base_url(&url);
                }
                match parsed.request_timeout_secs {
                    Some(0) => warn!(
                        "request_timeout_secs = 0 in {}; requests will not time out.",
                        cfg_path.display()
                    ),
                    Some(secs) => cfg.request_timeout = Some(Duration::from_secs(secs)),
                    None => {}
                }
                if let Some(title) = parsed.page_title {
                    cfg.page_title = title;
                }
                info!("Loaded config from {}", cfg_path.display());
            }
            Err(err) => {
                warn!(
                    "Failed to parse {} ({}). Using defaults.",
                    cfg_path.display(),
                    err
                );
            }
        },
        Err(_) => {
            info!("No {} found; using defaults", cfg_path.display());
        }
    }

    cfg
}
