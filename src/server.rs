use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use mongodb::Client;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;

use crate::data::stores::mongo::{self, MongoAuthorStore, MongoPostStore};
use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::cors::apply_cors;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::{AppState, routes};

/// Owns the running server: the database client, the serve task, and its
/// shutdown signal. No resource outlives a completed [`ServerHandle::stop`].
pub struct ServerHandle {
    addr: SocketAddr,
    client: Client,
    shutdown: oneshot::Sender<()>,
    serve_task: JoinHandle<std::io::Result<()>>,
}

/// Opens the database connection, then binds the listening socket; returns
/// only once both succeeded. A bind failure releases the already-acquired
/// connection before the error surfaces.
pub async fn start(settings: &Settings) -> Result<ServerHandle> {
    let (client, database) = mongo::connect(&settings.database_url).await?;

    let posts = Arc::new(MongoPostStore::new(&database));
    let authors = Arc::new(MongoAuthorStore::new(&database));
    if let Err(err) = authors.ensure_indexes().await {
        client.shutdown().await;
        return Err(anyhow::Error::new(err).context("failed to create author indexes"));
    }

    let state = AppState::new(posts, authors);
    let app = build_app(state, settings)?;

    let listener = match TcpListener::bind(&settings.http_addr).await {
        Ok(listener) => listener,
        Err(err) => {
            client.shutdown().await;
            return Err(anyhow::Error::new(err)
                .context(format!("failed to bind {}", settings.http_addr)));
        }
    };
    let addr = listener.local_addr().context("listener has no local addr")?;

    let (shutdown, shutdown_rx) = oneshot::channel::<()>();
    let serve_task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_rx.await.ok();
            })
            .await
    });

    info!("listening on {addr}");
    Ok(ServerHandle {
        addr,
        client,
        shutdown,
        serve_task,
    })
}

pub fn build_app(state: AppState, settings: &Settings) -> Result<Router> {
    let app = routes::router(state);
    let app = apply_trace(app);
    apply_cors(app, settings)
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Closes the database connection, then the listening socket, resolving
    /// once both are fully released.
    pub async fn stop(self) -> Result<()> {
        self.client.shutdown().await;

        // an already-finished serve loop has dropped the receiver
        let _ = self.shutdown.send(());
        self.serve_task
            .await
            .context("serve task panicked")?
            .context("serve loop failed")?;

        info!("server stopped");
        Ok(())
    }
}
