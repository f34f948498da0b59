use serde::Serialize;
use snafu::Snafu;

/// Human-readable key identifying a post. Doubles as the record key in the
/// document store, so it must be non-empty and free of path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Slug(String);

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(SlugError::EmptySlug);
        }

        if input.contains(['/', '\\']) {
            return Err(SlugError::PathSeparator {
                slug: input.to_string(),
            });
        }

        Ok(Slug(input.to_string()))
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::convert::AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Snafu, PartialEq)]
pub enum SlugError {
    /// slug must not be empty
    #[snafu(display("slug must not be empty"))]
    EmptySlug,

    /// slug would escape the posts collection
    #[snafu(display("slug `{slug}` must not contain a path separator"))]
    PathSeparator { slug: String },
}
