use std::fs;
use std::path::{Path, PathBuf};

use snafu::{OptionExt as _, ResultExt as _, Snafu};

use crate::config::ContentConfig;
use crate::error::{ApplicationError, LoadPostsSnafu};
use crate::model::{FrontMatter, Post, Slug, SlugError};

pub type Result<T, E = ContentError> = std::result::Result<T, E>;

pub fn load(config: &ContentConfig) -> Result<PostLibrary, ApplicationError> {
    PostLibrary::load(config).context(LoadPostsSnafu)
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ContentError {
    #[snafu(display("could not read the content directory `{}`: {source}", path.display()))]
    ReadContentDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("could not read the post `{}`: {source}", path.display()))]
    ReadPost {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("the post `{}` has no front matter block", path.display()))]
    MissingFrontMatter { path: PathBuf },

    #[snafu(display("could not parse the front matter of `{}`: {source}", path.display()))]
    ParseFrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[snafu(display("the file name of `{}` is not a usable slug: {source}", path.display()))]
    InvalidFileName { path: PathBuf, source: SlugError },
}

/// Every post under the content directory, loaded once at startup. The
/// listing is newest-first; the featured post is the first marked one in
/// file order.
#[derive(Debug, Clone)]
pub struct PostLibrary {
    posts: Vec<Post>,
    featured: Option<Slug>,
}

impl PostLibrary {
    pub fn load(config: &ContentConfig) -> Result<Self> {
        let dir = &config.content_dir;

        let entries = fs::read_dir(dir).context(ReadContentDirSnafu { path: dir.clone() })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_markdown_file(path))
            .collect();
        paths.sort();

        let posts = paths
            .iter()
            .map(|path| load_post(path))
            .collect::<Result<Vec<Post>>>()?;

        tracing::info!(count = posts.len(), path = %dir.display(), "loaded posts");

        Ok(Self::from_posts(posts))
    }

    /// Build a library from already-parsed posts, in file order.
    pub fn from_posts(posts: Vec<Post>) -> Self {
        let featured = posts
            .iter()
            .find(|post| post.featured)
            .map(|post| post.slug.clone());

        let mut posts = posts;
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        Self { posts, featured }
    }

    /// All posts, newest first.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn featured(&self) -> Option<&Post> {
        let slug = self.featured.as_ref()?;
        self.posts.iter().find(|post| &post.slug == slug)
    }
}

fn load_post(path: &Path) -> Result<Post> {
    let slug: Slug = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .parse()
        .context(InvalidFileNameSnafu { path })?;

    let text = fs::read_to_string(path).context(ReadPostSnafu { path })?;
    let block = front_matter_block(&text).context(MissingFrontMatterSnafu { path })?;

    let matter: FrontMatter =
        serde_yaml::from_str(block).context(ParseFrontMatterSnafu { path })?;

    Ok(Post::from_front_matter(slug, matter))
}

/// Extract the YAML between the leading `---` fence and the closing one.
fn front_matter_block(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let rest = text.strip_prefix("---")?;
    let end = rest.find("\n---")?;

    Some(&rest[..end])
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "md")
}
