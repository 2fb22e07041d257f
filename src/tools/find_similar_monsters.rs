//! MCP `find_similar_monsters` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `find_similar_monsters` MCP tool.
///
/// The named monster is resolved first; its nearest neighbors by hit points and
/// ability scores are returned, closest first.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindSimilarMonstersParams {
    /// Monster name, in any letter case.
    #[schemars(description = "The name of the monster to find neighbors of")]
    pub name: String,
}
