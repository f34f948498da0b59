use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};

use super::Slug;

/// Metadata of a single post, as shown on the front page. The body stays in
/// the markdown file; only the front matter travels through the API.
#[derive(Debug, Clone, PartialEq, Serialize, new)]
pub struct Post {
    pub slug: Slug,
    pub title: String,
    pub excerpt: String,
    pub published_at: DateTime<Utc>,
    pub featured: bool,
}

impl Post {
    pub fn from_front_matter(slug: Slug, matter: FrontMatter) -> Self {
        Self::new(
            slug,
            matter.title,
            matter.excerpt,
            matter.published_at,
            matter.featured,
        )
    }
}

/// The `---` delimited YAML block at the top of a post file.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub featured: bool,
}
