use axum::extract::State;
use axum::Json;
use futures::future::try_join_all;
use serde::Serialize;
use snafu::{OptionExt as _, ResultExt as _};
use tracing::instrument;

use crate::model::Post;

use super::error::{CounterSnafu, NoFeaturedPostSnafu};
use super::{App, Result};

/// A listed post together with its current view count.
#[derive(Debug, Serialize)]
pub struct PostEntry {
    #[serde(flatten)]
    post: Post,
    views: u64,
}

#[instrument(skip(app))]
pub async fn list(State(app): State<App>) -> Result<Json<Vec<PostEntry>>> {
    let entries = app.library.posts().iter().map(|post| annotate(&app, post));
    let entries = try_join_all(entries).await?;

    Ok(Json(entries))
}

#[instrument(skip(app))]
pub async fn featured(State(app): State<App>) -> Result<Json<PostEntry>> {
    let post = app.library.featured().context(NoFeaturedPostSnafu)?;
    let entry = annotate(&app, post).await?;

    Ok(Json(entry))
}

async fn annotate(app: &App, post: &Post) -> Result<PostEntry> {
    let views = app.counter.views(&post.slug).await.context(CounterSnafu)?;

    Ok(PostEntry {
        post: post.clone(),
        views,
    })
}
