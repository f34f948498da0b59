use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;
use snafu::ResultExt as _;
use url::Url;

use crate::error::{ApplicationError, ConfigLoadSnafu};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(rename = "host_address")]
    pub host: SocketAddr,
    #[serde(rename = "log_dir", default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(rename = "execution_mode", default)]
    pub mode: ExecutionMode,

    #[serde(flatten)]
    pub surreal: SurrealConfig,
    #[serde(flatten)]
    pub content: ContentConfig,
    #[serde(flatten)]
    pub site: SiteConfig,
}

impl Config {
    pub fn from_env() -> Result<Config, ApplicationError> {
        envy::from_env::<Config>().context(ConfigLoadSnafu)
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

/// Distinguishes local development from every other way of running the
/// service. In development, view-count mutations are suppressed so local
/// page loads do not pollute the production counters.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Development,
    #[default]
    Production,
}

impl ExecutionMode {
    pub fn is_development(self) -> bool {
        matches!(self, ExecutionMode::Development)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SurrealConfig {
    #[serde(rename = "surreal_endpoint")]
    pub endpoint: Url,
    #[serde(rename = "surreal_namespace")]
    pub namespace: String,
    #[serde(rename = "surreal_database")]
    pub database: String,
    #[serde(rename = "surreal_username")]
    pub username: String,
    #[serde(rename = "surreal_password")]
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Directory holding one markdown file per post; the file stem is the
    /// post's slug.
    #[serde(rename = "content_dir")]
    pub content_dir: PathBuf,
}

/// Static site metadata the front-end injects into the page head for
/// social sharing cards.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(rename = "site_title")]
    pub title: String,
    #[serde(rename = "site_description")]
    pub description: String,
    #[serde(rename = "site_author")]
    pub author: String,
    #[serde(rename = "site_url")]
    pub url: Url,
    #[serde(rename = "site_twitter")]
    pub twitter: String,
}
