//! HTTP server

use tokio::net::TcpListener;

use crate::core::{Config, Result, ServerState};
use crate::routes::build_app;

pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        self.state.start_background_tasks();

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, environment = %self.config.environment, "Cafe server listening");

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, build_app(self.state))
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
