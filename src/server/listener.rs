use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::router::Router;
use crate::store::FileStore;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listen_addr = cfg.listen_addr();
    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Listening on {}", listen_addr);

    let store = cfg.directory.clone().map(FileStore::new);
    match &store {
        Some(store) if !store.root().is_dir() => {
            tracing::warn!(directory = %store.root().display(), "File directory does not exist");
        }
        Some(store) => info!(directory = %store.root().display(), "Serving files"),
        None => info!("No --directory given, /files/ will answer 500"),
    }

    serve(listener, Arc::new(Router::new(store)), cfg.request_timeout).await
}

/// Accepts connections forever, one task per connection.
///
/// Failures stay inside the connection that caused them; a failed `accept`
/// is logged and the loop carries on.
pub async fn serve(
    listener: TcpListener,
    router: Arc<Router>,
    request_timeout: Option<Duration>,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router);
            let result = match request_timeout {
                Some(limit) => match tokio::time::timeout(limit, conn.run()).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::warn!(%peer, timeout = ?limit, "Connection timed out");
                        return;
                    }
                },
                None => conn.run().await,
            };

            if let Err(e) = result {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
