use axum::extract::State;
use axum::Json;
use serde::Serialize;
use url::Url;

use crate::config::SiteConfig;

use super::App;

/// What the front-end needs to fill the social sharing tags in the page
/// head.
#[derive(Debug, Clone, Serialize)]
pub struct SiteMeta {
    title: String,
    description: String,
    author: String,
    url: Url,
    twitter: String,
}

impl From<&SiteConfig> for SiteMeta {
    fn from(site: &SiteConfig) -> Self {
        Self {
            title: site.title.clone(),
            description: site.description.clone(),
            author: site.author.clone(),
            url: site.url.clone(),
            twitter: site.twitter.clone(),
        }
    }
}

pub async fn meta(State(app): State<App>) -> Json<SiteMeta> {
    Json(SiteMeta::from(&app.site))
}
