//! Single-invocation entry point.
//!
//! Reads one `ProjectRequest` event as JSON from stdin, runs it through the
//! project handler, and writes the `ProjectResponse` as JSON to stdout.

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use webbuilder_api::event::ProjectRequest;
use webbuilder_api::handler::ProjectHandler;
use webbuilder_api::telemetry;
use webbuilder_db::DatabaseConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("Failed to read event from stdin")?;
    let request: ProjectRequest =
        serde_json::from_str(&input).context("Failed to decode invocation event")?;

    let config = DatabaseConfig::from_env().context("Invalid database configuration")?;
    let handler = ProjectHandler::from_config(&config).context("Failed to create database pool")?;

    let response = handler.handle(&request).await;
    handler.pool().close().await;

    let mut output = serde_json::to_vec(&response).context("Failed to encode response")?;
    output.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&output).await?;
    stdout.flush().await?;
    Ok(())
}
