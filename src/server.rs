//! MCP server initialization for the stdio transport.
//!
//! [`serve_stdio`] opens the document store once, hands it to the tool handler,
//! and runs until the client disconnects.

use crate::config::BestiaryConfig;
use crate::store::{self, MonsterStore};
use crate::tools::MonsterTools;
use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

/// Open the store and wrap store and config in `Arc` for sharing with handlers.
fn setup_shared_state(
    config: BestiaryConfig,
) -> Result<(Arc<dyn MonsterStore>, Arc<BestiaryConfig>)> {
    let store: Arc<dyn MonsterStore> = Arc::new(store::open_store(&config.store)?);
    Ok((store, Arc::new(config)))
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: BestiaryConfig) -> Result<()> {
    tracing::info!("starting Bestiary MCP server on stdio");

    let (store, config) = setup_shared_state(config)?;

    let tools = MonsterTools::new(store, config);
    let transport = rmcp::transport::stdio();

    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}
