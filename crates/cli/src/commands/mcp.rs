use thingsctl_config::Config;
use thingsctl_task::{McpServer, ThingsService};

/// Run the MCP server until the client closes stdin.
///
/// Nothing but protocol frames may be written to stdout here.
pub async fn execute(config: &Config) -> eyre::Result<()> {
    tracing::info!(
        scripts = %config.scripts.directory.display(),
        "starting thingsctl MCP server"
    );

    let service = ThingsService::from_config(config);
    let mut server = McpServer::new(service);
    server.serve_stdio().await?;
    Ok(())
}
