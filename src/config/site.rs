//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::listing::PAGE_SIZE;

/// Environment variable overriding `cms_url`
pub const CMS_URL_ENV: &str = "BULLETIN_CMS_URL";

/// Environment variable overriding `asset_url`
pub const ASSET_URL_ENV: &str = "BULLETIN_ASSET_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // CMS
    pub cms_url: String,
    /// Base for image URLs, falls back to `cms_url` when empty
    pub asset_url: String,
    /// Per-request timeout in seconds; no timeout when unset
    pub timeout_secs: Option<u64>,

    // Listing
    pub per_page: usize,
    pub home_items: usize,

    // Date format (Moment.js style)
    pub date_format: String,
    pub time_format: String,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Bulletin".to_string(),
            description: String::new(),
            language: "en".to_string(),

            cms_url: "http://localhost:8055".to_string(),
            asset_url: String::new(),
            timeout_secs: None,

            per_page: PAGE_SIZE,
            home_items: 3,

            date_format: "MMMM DD, YYYY".to_string(),
            time_format: "HH:mm".to_string(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `BULLETIN_CMS_URL` / `BULLETIN_ASSET_URL` on top of the file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(CMS_URL_ENV).ok(),
            std::env::var(ASSET_URL_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, cms_url: Option<String>, asset_url: Option<String>) {
        if let Some(url) = cms_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("CMS url overridden from environment: {}", url);
            self.cms_url = url;
        }
        if let Some(url) = asset_url.filter(|u| !u.trim().is_empty()) {
            tracing::debug!("Asset url overridden from environment: {}", url);
            self.asset_url = url;
        }
    }

    /// Base URL used for `/assets/{image}` links
    pub fn asset_base(&self) -> &str {
        let base = if self.asset_url.trim().is_empty() {
            &self.cms_url
        } else {
            &self.asset_url
        };
        base.trim_end_matches('/')
    }

    /// Page size used by listings, never zero
    pub fn page_size(&self) -> usize {
        self.per_page.max(1)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Listen address for `bulletin serve`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}
