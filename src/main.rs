use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use webserver::config::{Config, UsageError};
use webserver::server;

#[tokio::main]
async fn main() -> ExitCode {
    let cfg = match Config::load(std::env::args()) {
        Ok(cfg) => cfg,
        Err(e) => {
            match e.downcast_ref::<UsageError>() {
                Some(usage) => eprintln!("{usage}"),
                None => eprintln!("error: {e:#}"),
            }
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tokio::select! {
        res = server::listener::run(Arc::new(cfg)) => {
            if let Err(e) = res {
                tracing::error!("{:#}", e);
                return ExitCode::FAILURE;
            }
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    ExitCode::SUCCESS
}
