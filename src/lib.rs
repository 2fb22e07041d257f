//! Tabletop monster lookups over MCP, backed by a managed vector database.
//!
//! Each monster record carries a 7-dimensional feature vector built from its hit
//! points and six ability scores. The `bestiary load` command bulk-inserts records
//! into an Astra DB collection configured for Euclidean distance; `bestiary serve`
//! exposes two MCP tools over stdio:
//!
//! | Tool | Behavior |
//! |------|----------|
//! | `get_monster` | Exact lookup by name (first letter capitalized, rest lowercased) |
//! | `find_similar_monsters` | Up to 20 monsters nearest to the named one |
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`monster`]: Record types, vector derivation, loading and lookups
//! - [`store`]: The [`store::MonsterStore`] seam and its Data API client
//! - [`tools`]: MCP tool handler
//! - [`server`]: stdio server wiring

pub mod config;
pub mod monster;
pub mod server;
pub mod store;
pub mod tools;
