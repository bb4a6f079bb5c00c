//! bulletin: tag-filtered article and event pages from a headless CMS
//!
//! Articles and events are read fresh from the CMS on every page load,
//! joined with their tags, then filtered, sorted and paginated in memory
//! before being rendered with Tera templates.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main application: site configuration plus the CMS client
#[derive(Clone)]
pub struct Bulletin {
    /// Site configuration
    pub config: config::SiteConfig,
    /// CMS client shared by every page
    pub cms: cms::CmsClient,
}

impl Bulletin {
    /// Load `config_path` if it exists, then apply environment overrides
    pub fn new<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let mut config = if config_path.exists() {
            config::SiteConfig::load(config_path)?
        } else {
            tracing::debug!("No config at {:?}, using defaults", config_path);
            config::SiteConfig::default()
        };
        config.apply_env();

        Self::from_config(config)
    }

    /// Create an instance from an already built configuration
    pub fn from_config(config: config::SiteConfig) -> Result<Self> {
        let cms = cms::CmsClient::new(&config)?;
        Ok(Self { config, cms })
    }

    /// Start the HTTP server
    pub async fn serve(&self, ip: &str, port: u16) -> Result<()> {
        server::start(self, ip, port).await
    }
}
