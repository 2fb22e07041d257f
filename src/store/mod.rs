//! Document store access.
//!
//! [`MonsterStore`] is the seam between the loader/tool handlers and the
//! external vector database. [`data_api::DataApiStore`] implements it over the
//! Astra DB Data API; tests substitute an in-memory store.

pub mod data_api;

use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::monster::types::{Monster, VECTOR_DIMENSION};

/// Errors returned by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The Data API reports most failures in an `errors` array, usually with HTTP 200.
    #[error("store error: {}", format_api_errors(.0))]
    Api(Vec<ApiError>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// One entry of the Data API `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

fn format_api_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|e| match &e.error_code {
            Some(code) => format!("{} ({code})", e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Distance metric for a vector collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Euclidean,
    /// The store's default when a collection is created without a metric.
    #[default]
    Cosine,
    DotProduct,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Cosine => "cosine",
            Self::DotProduct => "dot_product",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vector settings of a collection. Fixed at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorOptions {
    pub dimension: usize,
    #[serde(default)]
    pub metric: Metric,
}

/// A named collection and its vector settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSpec {
    pub name: String,
    pub vector: Option<VectorOptions>,
}

impl CollectionSpec {
    /// The configuration monster collections are created with: 7 dimensions, Euclidean.
    pub fn monsters(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vector: Some(VectorOptions {
                dimension: VECTOR_DIMENSION,
                metric: Metric::Euclidean,
            }),
        }
    }
}

/// Open the Data API store described by `config`. Fails when credentials are missing.
pub fn open_store(config: &StoreConfig) -> anyhow::Result<data_api::DataApiStore> {
    let credentials = config.credentials()?;
    let store = data_api::DataApiStore::new(&credentials, config)?;
    tracing::info!(
        endpoint = %credentials.api_endpoint,
        keyspace = %config.keyspace,
        collection = %config.collection,
        "document store ready"
    );
    Ok(store)
}

/// Operations the loader and the tool server need from the document store.
#[async_trait::async_trait]
pub trait MonsterStore: Send + Sync {
    /// Create the collection, or confirm it already exists with the same settings.
    async fn create_collection(&self, spec: &CollectionSpec) -> Result<(), StoreError>;

    /// List collections in the keyspace with their vector settings.
    async fn list_collections(&self) -> Result<Vec<CollectionSpec>, StoreError>;

    /// Insert documents in bulk. Returns how many were inserted.
    async fn insert_many(&self, documents: &[Monster]) -> Result<usize, StoreError>;

    /// Find the single document whose `name` equals `name` exactly.
    async fn find_one_by_name(&self, name: &str) -> Result<Option<Monster>, StoreError>;

    /// Documents ordered by vector distance to `vector`, closest first, at most `limit`.
    async fn find_nearest(&self, vector: &[f64], limit: usize)
        -> Result<Vec<Monster>, StoreError>;
}
