use cafe_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    let _log_guard = init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref());

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Cafe server starting...");

    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
