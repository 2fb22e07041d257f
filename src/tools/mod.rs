pub mod find_similar_monsters;
pub mod get_monster;

use find_similar_monsters::FindSimilarMonstersParams;
use get_monster::GetMonsterParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use std::sync::Arc;

use crate::config::BestiaryConfig;
use crate::monster::lookup;
use crate::monster::types::Monster;
use crate::store::MonsterStore;

/// The Bestiary MCP tool handler. Holds the shared store handle and config and
/// exposes the lookup tools via the `#[tool_router]` macro.
#[derive(Clone)]
pub struct MonsterTools {
    tool_router: ToolRouter<Self>,
    store: Arc<dyn MonsterStore>,
    config: Arc<BestiaryConfig>,
}

#[tool_router]
impl MonsterTools {
    pub fn new(store: Arc<dyn MonsterStore>, config: Arc<BestiaryConfig>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store,
            config,
        }
    }

    /// Names of the tools this handler routes, in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }

    /// Look up a single monster by name.
    #[tool(description = "Get a dungeons and dragons monster by name")]
    pub async fn get_monster(
        &self,
        Parameters(params): Parameters<GetMonsterParams>,
    ) -> Result<String, String> {
        tracing::info!(name = %params.name, "get_monster called");

        let monster = lookup::get_monster(self.store.as_ref(), &params.name)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "get_monster failed");
                format!("lookup failed: {e}")
            })?;

        if monster.is_none() {
            tracing::info!(name = %params.name, "no monster with that name");
        }
        // `$vector` is store plumbing, not part of the record handed to clients.
        let monster = monster.map(Monster::without_vector);

        serde_json::to_string_pretty(&monster).map_err(|e| format!("serialization failed: {e}"))
    }

    /// Nearest neighbors of a named monster in stat space.
    #[tool(description = "Find similar monsters by name")]
    pub async fn find_similar_monsters(
        &self,
        Parameters(params): Parameters<FindSimilarMonstersParams>,
    ) -> Result<String, String> {
        let limit = self.config.search.similar_limit;
        tracing::info!(name = %params.name, limit, "find_similar_monsters called");

        let monsters = lookup::find_similar_monsters(self.store.as_ref(), &params.name, limit)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "find_similar_monsters failed");
                e.to_string()
            })?;

        tracing::info!(results = monsters.len(), "similar monsters found");
        let monsters: Vec<Monster> = monsters.into_iter().map(Monster::without_vector).collect();
        serde_json::to_string_pretty(&monsters).map_err(|e| format!("serialization failed: {e}"))
    }
}

#[tool_handler]
impl ServerHandler for MonsterTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "Bestiary looks up tabletop monsters. Use get_monster for one monster by name \
                 and find_similar_monsters for the monsters closest to it in hit points and \
                 ability scores."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
