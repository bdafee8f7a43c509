use desk_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment and configuration
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. Logging (the guard must live for the whole process)
    let _guard = init_logger(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    )?;

    tracing::info!("Desk server starting...");

    // 3. Server state (store, seed inventory, booking manager)
    let state = ServerState::initialize(&config).await?;

    // 4. HTTP server (Server::run starts the background tasks)
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
