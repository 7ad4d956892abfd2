//! # Client configuration — `whatsyourrecipe.toml`
//!
//! Tunables for the recipe client. Every section has defaults, so a missing
//! or empty file is equivalent to [`ClientConfig::default`].
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = ""              # empty = resolve from the page host
//!
//! [feed]
//! page_size = 10
//! trending_days = 7
//!
//! [search]
//! limit = 5
//! min_query_len = 2
//!
//! [ui]
//! notification_secs = 5
//! ```
//!
//! ## API base URL
//!
//! [`resolve_base_url`] picks the server: an explicit override wins, then a
//! local host (`localhost`, `127.0.0.1`, `0.0.0.0`) maps to
//! [`LOCAL_API_URL`], anything else to [`PRODUCTION_API_URL`].

use serde::{Deserialize, Serialize};

pub const LOCAL_API_URL: &str = "http://localhost:8000";
pub const PRODUCTION_API_URL: &str = "https://coffee-m9ux.onrender.com";

/// Environment variable that overrides the API base URL on native builds.
pub const API_URL_ENV: &str = "RECIPES_API_URL";

const LOCAL_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "0.0.0.0"];

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Explicit server URL. Empty means resolve from the host.
    #[serde(default)]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Initial trending window in days (1, 7 or 30).
    #[serde(default = "default_trending_days")]
    pub trending_days: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_limit")]
    pub limit: u32,
    /// Queries shorter than this (after trimming) are ignored.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Seconds before a notification is dismissed automatically.
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u32,
}

fn default_page_size() -> u32 {
    10
}

fn default_trending_days() -> u32 {
    7
}

fn default_search_limit() -> u32 {
    5
}

fn default_min_query_len() -> usize {
    2
}

fn default_notification_secs() -> u32 {
    5
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            trending_days: default_trending_days(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_search_limit(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_secs: default_notification_secs(),
        }
    }
}

impl ClientConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "whatsyourrecipe.toml"
    }

    /// Parse from TOML string. A zero `page_size` is raised to 1.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(s)?;
        config.feed.page_size = config.feed.page_size.max(1);
        Ok(config)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Builder method to set the API URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = url.into();
        self
    }

    /// The server to talk to for a page served from `host`.
    pub fn api_base_url(&self, host: Option<&str>) -> String {
        let configured = Some(self.api.base_url.as_str()).filter(|u| !u.trim().is_empty());
        resolve_base_url(host, configured)
    }
}

/// Server URL for a host, with an optional override. Trailing slashes are trimmed.
pub fn resolve_base_url(host: Option<&str>, override_url: Option<&str>) -> String {
    if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }
    match host {
        Some(h) if LOCAL_HOSTS.contains(&h) => LOCAL_API_URL.to_string(),
        _ => PRODUCTION_API_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.feed.page_size, 10);
        assert_eq!(config.feed.trending_days, 7);
        assert_eq!(config.search.limit, 5);
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.ui.notification_secs, 5);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = ClientConfig::from_toml("[feed]\npage_size = 20\n").unwrap();
        assert_eq!(config.feed.page_size, 20);
        assert_eq!(config.feed.trending_days, 7);
        let again = ClientConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(again, config);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let config = ClientConfig::from_toml("[feed]\npage_size = 0\n").unwrap();
        assert_eq!(config.feed.page_size, 1);
    }

    #[test]
    fn test_base_url_resolution() {
        assert_eq!(resolve_base_url(Some("localhost"), None), LOCAL_API_URL);
        assert_eq!(resolve_base_url(Some("127.0.0.1"), None), LOCAL_API_URL);
        assert_eq!(resolve_base_url(Some("0.0.0.0"), None), LOCAL_API_URL);
        assert_eq!(resolve_base_url(Some("recipes.example"), None), PRODUCTION_API_URL);
        assert_eq!(resolve_base_url(None, None), PRODUCTION_API_URL);
        assert_eq!(
            resolve_base_url(Some("localhost"), Some("http://api.test/")),
            "http://api.test"
        );

        let config = ClientConfig::default().with_base_url("http://x:1");
        assert_eq!(config.api_base_url(Some("localhost")), "http://x:1");
        assert_eq!(ClientConfig::default().api_base_url(Some("localhost")), LOCAL_API_URL);
    }
}
