use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use snafu::ResultExt as _;
use tracing::instrument;

use crate::model::Slug;

use super::error::{CounterSnafu, InvalidSlugSnafu};
use super::{App, Result};

/// Envelope the front-end's fetch wrapper checks after reporting a view.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    error: bool,
    message: &'static str,
}

#[instrument(skip(app))]
pub async fn update(
    State(app): State<App>,
    Path(slug): Path<String>,
) -> Result<Json<UpdateResponse>> {
    let slug: Slug = slug.parse().context(InvalidSlugSnafu)?;

    app.increment(&slug).await.context(CounterSnafu)?;

    Ok(Json(UpdateResponse {
        error: false,
        message: "View count updated!",
    }))
}

#[derive(Debug, Serialize)]
pub struct ViewsResponse {
    views: u64,
}

#[instrument(skip(app))]
pub async fn read(
    State(app): State<App>,
    Path(slug): Path<String>,
) -> Result<Json<ViewsResponse>> {
    let slug: Slug = slug.parse().context(InvalidSlugSnafu)?;

    let views = app.views(&slug).await.context(CounterSnafu)?;

    Ok(Json(ViewsResponse { views }))
}
