use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{config::Config, errors::AppResult};

const APP_NAME: &str = "summary-quiz-server";

/// Handle on the service database. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    /// Builds the client without touching the network; the driver connects on first use.
    pub async fn new(config: &Config) -> AppResult<Self> {
        let options = client_options(&config.mongo_conn_string).await?;

        Ok(Self {
            client: Client::with_options(options)?,
            db_name: config.mongo_db_name.clone(),
        })
    }

    /// Connects and pings; fails fast if the server is unreachable.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let database = Self::new(config).await?;

        database.ping().await?;
        log::info!("Connected to MongoDB database '{}'", database.db_name);

        Ok(database)
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        if let Err(err) = self.ping().await {
            log::warn!("MongoDB health check failed: {}", err);
            return Err(err);
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

async fn client_options(conn_string: &str) -> AppResult<ClientOptions> {
    let mut options = ClientOptions::parse(conn_string).await?;

    options.app_name = Some(APP_NAME.to_string());
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(2);
    options.connect_timeout = Some(Duration::from_secs(5));
    options.server_selection_timeout = Some(Duration::from_secs(5));

    Ok(options)
}
