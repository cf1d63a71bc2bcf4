use anyhow::Context;
use mongodb::bson::doc;
use mongodb::{Client, Database};

pub mod author_store;
pub mod post_store;

pub use author_store::MongoAuthorStore;
pub use post_store::MongoPostStore;

const DEFAULT_DATABASE: &str = "blog-api";

/// Connects and verifies the connection with a ping. The database name comes
/// from the URL path when present. On a failed ping the client is shut down
/// before the error is returned.
pub async fn connect(database_url: &str) -> anyhow::Result<(Client, Database)> {
    let client = Client::with_uri_str(database_url)
        .await
        .context("failed to create MongoDB client")?;

    let database = client
        .default_database()
        .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

    if let Err(err) = database.run_command(doc! { "ping": 1 }).await {
        client.shutdown().await;
        return Err(anyhow::Error::new(err).context("MongoDB ping failed"));
    }

    Ok((client, database))
}
