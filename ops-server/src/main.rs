use ops_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv before config so .env values are visible)
    let _ = dotenv::dotenv();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Logging
    ops_server::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!("Hemline ops server starting...");

    // 4. Initialize state (database, migrations, services)
    let state = ServerState::initialize(&config).await?;

    // 5. Run the HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
