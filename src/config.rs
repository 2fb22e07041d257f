use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct BestiaryConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the database, e.g. `https://<id>-<region>.apps.astra.datastax.com`.
    pub api_endpoint: Option<String>,
    pub application_token: Option<String>,
    pub keyspace: String,
    pub collection: String,
    pub timeout_secs: u64,
    /// Documents per `insertMany` request.
    pub insert_chunk_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub similar_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_endpoint: None,
            application_token: None,
            keyspace: "default_keyspace".into(),
            collection: "monster_list".into(),
            timeout_secs: 30,
            insert_chunk_size: 50,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { similar_limit: 20 }
    }
}

/// Credentials resolved from [`StoreConfig`], both guaranteed present.
#[derive(Debug, Clone)]
pub struct StoreCredentials {
    pub api_endpoint: String,
    pub application_token: String,
}

/// Returns `~/.bestiary/`
pub fn default_bestiary_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".bestiary"))
}

/// Returns the default config file path: `~/.bestiary/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    default_bestiary_dir().map(|dir| dir.join("config.toml"))
}

impl BestiaryConfig {
    /// Load config from the default TOML file (if any) then apply env var overrides.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from(path),
            None => {
                let mut config = Self::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            BestiaryConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ASTRA_DB_API_ENDPOINT") {
            self.store.api_endpoint = Some(val);
        }
        if let Ok(val) = std::env::var("ASTRA_DB_APPLICATION_TOKEN") {
            self.store.application_token = Some(val);
        }
        if let Ok(val) = std::env::var("ASTRA_DB_KEYSPACE") {
            self.store.keyspace = val;
        }
        if let Ok(val) = std::env::var("BESTIARY_COLLECTION") {
            self.store.collection = val;
        }
        if let Ok(val) = std::env::var("BESTIARY_LOG_LEVEL") {
            self.server.log_level = val;
        }
    }
}

impl StoreConfig {
    /// Both the loader and the server need an endpoint and a token before touching the store.
    pub fn credentials(&self) -> Result<StoreCredentials> {
        let api_endpoint = non_empty(self.api_endpoint.as_deref()).context(
            "missing API endpoint: set ASTRA_DB_API_ENDPOINT or store.api_endpoint in the config file",
        )?;
        let application_token = non_empty(self.application_token.as_deref()).context(
            "missing application token: set ASTRA_DB_APPLICATION_TOKEN or store.application_token in the config file",
        )?;

        Ok(StoreCredentials {
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            application_token: application_token.to_string(),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BestiaryConfig::default();
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.store.keyspace, "default_keyspace");
        assert_eq!(config.store.collection, "monster_list");
        assert_eq!(config.store.insert_chunk_size, 50);
        assert_eq!(config.search.similar_limit, 20);
        assert!(config.store.api_endpoint.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[server]
log_level = "debug"

[store]
api_endpoint = "https://example.apps.astra.datastax.com"
collection = "creatures"

[search]
similar_limit = 5
"#;
        let config: BestiaryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.log_level, "debug");
        assert_eq!(
            config.store.api_endpoint.as_deref(),
            Some("https://example.apps.astra.datastax.com")
        );
        assert_eq!(config.store.collection, "creatures");
        assert_eq!(config.search.similar_limit, 5);
        // defaults still apply for unset fields
        assert_eq!(config.store.keyspace, "default_keyspace");
        assert_eq!(config.store.timeout_secs, 30);
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = BestiaryConfig::default();
        std::env::set_var("ASTRA_DB_API_ENDPOINT", "https://env.example.com");
        std::env::set_var("ASTRA_DB_APPLICATION_TOKEN", "AstraCS:env-token");
        std::env::set_var("BESTIARY_COLLECTION", "env_monsters");
        std::env::set_var("BESTIARY_LOG_LEVEL", "trace");

        config.apply_env_overrides();

        assert_eq!(
            config.store.api_endpoint.as_deref(),
            Some("https://env.example.com")
        );
        assert_eq!(
            config.store.application_token.as_deref(),
            Some("AstraCS:env-token")
        );
        assert_eq!(config.store.collection, "env_monsters");
        assert_eq!(config.server.log_level, "trace");

        // Clean up
        std::env::remove_var("ASTRA_DB_API_ENDPOINT");
        std::env::remove_var("ASTRA_DB_APPLICATION_TOKEN");
        std::env::remove_var("BESTIARY_COLLECTION");
        std::env::remove_var("BESTIARY_LOG_LEVEL");
    }

    #[test]
    fn credentials_require_endpoint_and_token() {
        let mut store = StoreConfig::default();
        let err = store.credentials().unwrap_err();
        assert!(err.to_string().contains("API endpoint"));

        store.api_endpoint = Some("https://db.example.com/".into());
        store.application_token = Some("   ".into());
        let err = store.credentials().unwrap_err();
        assert!(err.to_string().contains("application token"));

        store.application_token = Some("AstraCS:abc".into());
        let creds = store.credentials().unwrap();
        assert_eq!(creds.api_endpoint, "https://db.example.com");
        assert_eq!(creds.application_token, "AstraCS:abc");
    }
}
