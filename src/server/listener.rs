use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::supervisor::Supervisor;

/// Creates the listening socket. Failure here is fatal to the process.
pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

pub async fn run(cfg: Arc<Config>) -> anyhow::Result<()> {
    let listener = bind(&cfg.listen_addr()).await?;
    serve(listener, cfg, Supervisor::start()).await
}

/// Pause before the next accept after `e`.
///
/// Per-connection failures retry at once; anything else (descriptor
/// exhaustion, out of memory) waits so the loop does not spin.
pub fn accept_backoff(e: &io::Error) -> Option<Duration> {
    match e.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::Interrupted
        | io::ErrorKind::WouldBlock => None,
        _ => Some(Duration::from_millis(100)),
    }
}

/// Accepts forever, handing each connection to its own worker.
///
/// Only the accepted stream moves into the worker; the listener stays here.
pub async fn serve(
    listener: TcpListener,
    cfg: Arc<Config>,
    supervisor: Supervisor,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Accept failed: {}", e);
                if let Some(pause) = accept_backoff(&e) {
                    tokio::time::sleep(pause).await;
                }
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let config = cfg.clone();
        supervisor.spawn(peer, async move {
            let mut conn = Connection::new(socket, config);
            if let Err(e) = conn.run().await {
                error!("Connection error from {}: {:#}", peer, e);
            }
            info!("Connection from {} closed", peer);
        });
    }
}
