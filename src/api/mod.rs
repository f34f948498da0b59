use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use snafu::ResultExt as _;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ApplicationError, BindAddressSnafu, WebServerSnafu};

pub use error::*;
pub use state::{create_app, App};

mod error;
mod posts;
mod site;
mod state;
mod views;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

pub fn create_router(app: App) -> Router {
    Router::new()
        .route("/posts", get(posts::list))
        .route("/posts/featured", get(posts::featured))
        .route("/posts/views/:slug", post(views::update).get(views::read))
        .route("/site", get(site::meta))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app)
}

pub async fn serve(address: SocketAddr, app: App) -> Result<(), ApplicationError> {
    let router = create_router(app);

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .context(BindAddressSnafu { address })?;

    tracing::info!(%address, "serving the blog api");

    axum::serve(listener, router).await.context(WebServerSnafu)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::config::{ExecutionMode, SiteConfig};
    use crate::content::PostLibrary;
    use crate::counter::ViewCounter;
    use crate::database::testing::MemoryStore;
    use crate::model::Post;

    use super::*;

    fn site() -> SiteConfig {
        SiteConfig {
            title: "After Thoughts".to_string(),
            description: "A software development blog".to_string(),
            author: "Tayte Stokes".to_string(),
            url: "https://afterthoughts.dev".parse().unwrap(),
            twitter: "@taytestokes".to_string(),
        }
    }

    fn post_entry(slug: &str, title: &str, published_at: &str, featured: bool) -> Post {
        Post::new(
            slug.parse().unwrap(),
            title.to_string(),
            String::new(),
            published_at.parse().unwrap(),
            featured,
        )
    }

    fn server_with(store: Arc<MemoryStore>, mode: ExecutionMode, posts: Vec<Post>) -> TestServer {
        let counter = ViewCounter::new(store, mode);
        let app = App::new(counter, Arc::new(PostLibrary::from_posts(posts)), site());

        TestServer::new(create_router(app)).unwrap()
    }

    fn server(store: Arc<MemoryStore>) -> TestServer {
        server_with(store, ExecutionMode::Production, Vec::new())
    }

    #[tokio::test]
    async fn posting_a_view_updates_the_count() {
        let store = Arc::new(MemoryStore::new());
        let server = server(store.clone());

        let response = server.post("/posts/views/my-first-post").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "error": false, "message": "View count updated!" }));
        assert_eq!(store.views_of("my-first-post"), Some(1));

        server.post("/posts/views/my-first-post").await.assert_status_ok();
        assert_eq!(store.views_of("my-first-post"), Some(2));
    }

    #[tokio::test]
    async fn reading_views_returns_the_stored_count() {
        let store = Arc::new(MemoryStore::new().with_views("my-first-post", 3));
        let server = server(store);

        let response = server.get("/posts/views/my-first-post").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "views": 3 }));
    }

    #[tokio::test]
    async fn reading_an_unseen_post_returns_zero() {
        let server = server(Arc::new(MemoryStore::new()));

        let response = server.get("/posts/views/never-viewed").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "views": 0 }));
    }

    #[tokio::test]
    async fn a_store_failure_becomes_an_error_envelope() {
        let store = Arc::new(MemoryStore::new().failing_writes());
        let server = server(store);

        let response = server.post("/posts/views/my-first-post").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = response.json();
        assert_eq!(body["error"], true);
        assert!(
            body["message"].as_str().unwrap().contains("store unavailable"),
            "the envelope should carry the store's failure message, got: {body}"
        );
    }

    #[tokio::test]
    async fn development_mode_reports_success_without_store_calls() {
        let store = Arc::new(MemoryStore::new().with_views("my-first-post", 7));
        let server = server_with(store.clone(), ExecutionMode::Development, Vec::new());

        let response = server.post("/posts/views/my-first-post").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "error": false, "message": "View count updated!" }));

        assert_eq!(store.views_of("my-first-post"), Some(7));
        assert_eq!(store.store_calls(), 0);
    }

    #[tokio::test]
    async fn a_slug_with_a_path_separator_is_rejected() {
        let server = server(Arc::new(MemoryStore::new()));

        let response = server.post("/posts/views/..%2Fother").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn the_listing_carries_view_counts_newest_first() {
        let store = Arc::new(MemoryStore::new().with_views("older-post", 12));
        let posts = vec![
            post_entry("older-post", "Older", "2021-01-01T00:00:00Z", false),
            post_entry("newer-post", "Newer", "2021-06-01T00:00:00Z", false),
        ];
        let server = server_with(store, ExecutionMode::Production, posts);

        let response = server.get("/posts").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body[0]["slug"], "newer-post");
        assert_eq!(body[0]["views"], 0);
        assert_eq!(body[1]["slug"], "older-post");
        assert_eq!(body[1]["views"], 12);
    }

    #[tokio::test]
    async fn the_featured_post_is_served_with_its_views() {
        let store = Arc::new(MemoryStore::new().with_views("shiny-post", 4));
        let posts = vec![
            post_entry("plain-post", "Plain", "2021-06-01T00:00:00Z", false),
            post_entry("shiny-post", "Shiny", "2021-01-01T00:00:00Z", true),
        ];
        let server = server_with(store, ExecutionMode::Production, posts);

        let response = server.get("/posts/featured").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["slug"], "shiny-post");
        assert_eq!(body["featured"], true);
        assert_eq!(body["views"], 4);
    }

    #[tokio::test]
    async fn no_featured_post_is_a_not_found() {
        let posts = vec![post_entry("plain-post", "Plain", "2021-06-01T00:00:00Z", false)];
        let server = server_with(
            Arc::new(MemoryStore::new()),
            ExecutionMode::Production,
            posts,
        );

        let response = server.get("/posts/featured").await;
        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "error": true, "message": "no post is currently featured" }));
    }

    #[tokio::test]
    async fn site_metadata_round_trips_the_configuration() {
        let server = server(Arc::new(MemoryStore::new()));

        let response = server.get("/site").await;
        response.assert_status_ok();
        response.assert_json(&json!({
            "title": "After Thoughts",
            "description": "A software development blog",
            "author": "Tayte Stokes",
            "url": "https://afterthoughts.dev/",
            "twitter": "@taytestokes",
        }));
    }
}
