use std::sync::Arc;

use derive_new::new;
use snafu::{ResultExt as _, Snafu};
use tracing::instrument;

use crate::config::ExecutionMode;
use crate::database::{DatabaseError, ViewStore};
use crate::model::Slug;
use crate::Located;

pub type Result<T, E = CounterError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CounterError {
    #[snafu(display("could not read the view count for `{slug}`: {source}"))]
    ReadViews { slug: Slug, source: DatabaseError },

    #[snafu(display("could not update the view count for `{slug}`: {source}"))]
    WriteViews { slug: Slug, source: DatabaseError },
}

impl Located for CounterError {
    fn location(&self) -> snafu::Location {
        match self {
            CounterError::ReadViews { source, .. } | CounterError::WriteViews { source, .. } => {
                source.location()
            }
        }
    }
}

/// Per-post view counter on top of the document store.
///
/// Incrementing is a plain read followed by a merge-write, not an atomic
/// update: two increments whose reads overlap can both see the same base
/// value and lose one of the two updates. The front page tolerates an
/// occasionally short count.
#[derive(Clone, new)]
pub struct ViewCounter {
    store: Arc<dyn ViewStore>,
    mode: ExecutionMode,
}

impl ViewCounter {
    /// Bump the counter for `slug` by one, creating the record on the first
    /// view. Suppressed in development so local page loads do not pollute
    /// the production counters.
    #[instrument(skip(self))]
    pub async fn increment(&self, slug: &Slug) -> Result<()> {
        if self.mode.is_development() {
            tracing::debug!(%slug, "development mode, leaving the view count untouched");
            return Ok(());
        }

        let views = self
            .store
            .views(slug)
            .await
            .context(ReadViewsSnafu { slug: slug.clone() })?;

        let views = match views {
            Some(current) => current + 1,
            None => 1,
        };

        self.store
            .merge_views(slug, views)
            .await
            .context(WriteViewsSnafu { slug: slug.clone() })?;

        tracing::info!(%slug, views, "view count updated");

        Ok(())
    }

    /// Current view count for `slug`. A post that has never been viewed
    /// reads as zero.
    #[instrument(skip(self))]
    pub async fn views(&self, slug: &Slug) -> Result<u64> {
        let views = self
            .store
            .views(slug)
            .await
            .context(ReadViewsSnafu { slug: slug.clone() })?;

        Ok(views.unwrap_or(0))
    }
}
