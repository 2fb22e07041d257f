//! MCP `get_monster` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `get_monster` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetMonsterParams {
    /// Monster name, in any letter case.
    #[schemars(description = "The name of the monster")]
    pub name: String,
}
