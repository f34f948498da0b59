use async_trait::async_trait;
use derive_new::new;
use serde::{Deserialize, Serialize};
use snafu::{Location, ResultExt as _, Snafu};
use surrealdb::engine::any::Any;
use surrealdb::opt::auth;
use surrealdb::Surreal;
use url::Url;

use crate::config::SurrealConfig;
use crate::error::{ApplicationError, ConnectDatabaseSnafu};
use crate::model::Slug;
use crate::Located;

pub type Result<T, E = DatabaseError> = std::result::Result<T, E>;

/// Table holding one document per post, keyed by slug.
pub const POSTS_TABLE: &str = "posts";

pub async fn connect(config: &SurrealConfig) -> Result<Database, ApplicationError> {
    Database::connect(config).await.context(ConnectDatabaseSnafu)
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DatabaseError {
    #[snafu(display("failed to query the database at {location}: {source}"))]
    DatabaseQuery {
        source: surrealdb::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("cannot connect to the database `{endpoint}` at {location}: {source}"))]
    DatabaseConnection {
        endpoint: Url,
        source: surrealdb::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

impl Located for DatabaseError {
    fn location(&self) -> Location {
        match self {
            DatabaseError::DatabaseQuery { location, .. }
            | DatabaseError::DatabaseConnection { location, .. } => *location,
        }
    }
}

/// The slice of the document store the view counter needs: read a counter
/// and merge-write it back. Narrow on purpose, so the counter logic can be
/// exercised against an in-memory store.
#[async_trait]
pub trait ViewStore: Send + Sync {
    /// Current view count for `slug`, or `None` when no record exists yet.
    async fn views(&self, slug: &Slug) -> Result<Option<u64>>;

    /// Merge `views` into the record for `slug`, creating the record when
    /// absent. Other fields on the document are left untouched.
    async fn merge_views(&self, slug: &Slug, views: u64) -> Result<()>;
}

/// The `views` field of a post document. Everything else on the document
/// belongs to other writers and is never touched from here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewRecord {
    pub views: u64,
}

/// Wrapper around the remote document store connection.
#[derive(Debug, Clone, new)]
pub struct Database {
    database: Surreal<Any>,
}

impl Database {
    pub async fn connect(config: &SurrealConfig) -> Result<Self> {
        let database = surrealdb::engine::any::connect(config.endpoint.as_str())
            .await
            .context(DatabaseConnectionSnafu {
                endpoint: config.endpoint.clone(),
            })?;

        database
            .signin(auth::Database {
                username: &config.username,
                password: &config.password,
                namespace: &config.namespace,
                database: &config.database,
            })
            .await
            .context(DatabaseConnectionSnafu {
                endpoint: config.endpoint.clone(),
            })?;

        database
            .use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .context(DatabaseConnectionSnafu {
                endpoint: config.endpoint.clone(),
            })?;

        Ok(Database::new(database))
    }
}

impl std::ops::Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.database
    }
}

#[async_trait]
impl ViewStore for Database {
    async fn views(&self, slug: &Slug) -> Result<Option<u64>> {
        let record: Option<ViewRecord> = self
            .select((POSTS_TABLE, slug.as_ref()))
            .await
            .context(DatabaseQuerySnafu)?;

        Ok(record.map(|record| record.views))
    }

    async fn merge_views(&self, slug: &Slug, views: u64) -> Result<()> {
        let _record: Option<ViewRecord> = self
            .update((POSTS_TABLE, slug.as_ref()))
            .merge(ViewRecord { views })
            .await
            .context(DatabaseQuerySnafu)?;

        Ok(())
    }
}
