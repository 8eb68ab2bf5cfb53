use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::{DatabaseConfig, FixstatsConfig, ServerConfig};
use crate::errors::FixstatsError;
use tracing::info;

pub async fn handle_serve(args: ServeArgs, mut config: FixstatsConfig) -> Result<(), FixstatsError> {
    let server = config.server.get_or_insert_with(ServerConfig::default);
    if let Some(host) = args.host {
        server.host = Some(host);
    }
    if let Some(port) = args.port {
        server.port = Some(port);
    }
    if let Some(db) = args.db {
        config.database.get_or_insert_with(DatabaseConfig::default).path = Some(db);
    }

    info!(host = %config.host(), port = config.port(), db = %config.db_path(), "Starting API server");

    let state = api::create_app_state(&config).await?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| FixstatsError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
