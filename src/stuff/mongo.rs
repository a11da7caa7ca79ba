//! MongoDB-backed [`StuffStore`].

use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::info;

use super::id::StuffId;
use super::model::{Stuff, StuffDocument};
use super::store::{StoreError, StuffStore};
use crate::config::Config;

const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// One collection on one database, through a pooled driver client.
///
/// Cloning is cheap; clones share the client's connection pool.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<StuffDocument>,
}

impl MongoStore {
    /// Builds the client and pings the deployment, so an unreachable store is
    /// reported at startup rather than on the first request.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.mongodb_url).await?;
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);

        let client = Client::with_options(options)?;
        client.database("admin").run_command(doc! { "ping": 1 }).await?;

        info!(database = %config.database, collection = %config.collection, "connected to mongodb");
        Ok(Self::from_client(&client, &config.database, &config.collection))
    }

    pub fn from_client(client: &Client, database: &str, collection: &str) -> Self {
        Self { collection: client.database(database).collection(collection) }
    }
}

#[async_trait]
impl StuffStore for MongoStore {
    async fn find_all(&self) -> Result<Vec<Stuff>, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        let docs: Vec<StuffDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Stuff::from).collect())
    }

    async fn find_by_id(&self, id: StuffId) -> Result<Option<Stuff>, StoreError> {
        let found = self.collection.find_one(doc! { "_id": id.object_id() }).await?;
        Ok(found.map(Stuff::from))
    }

    async fn insert(&self, stuff: &Stuff) -> Result<(), StoreError> {
        self.collection.insert_one(StuffDocument::from(stuff)).await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: StuffId) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(doc! { "_id": id.object_id() }).await?;
        Ok(result.deleted_count)
    }
}
