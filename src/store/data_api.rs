//! Astra DB Data API client.
//!
//! Every operation is a JSON command POSTed either to the keyspace URL
//! (`createCollection`, `findCollections`) or to the collection URL
//! (`insertMany`, `findOne`, `find`). Responses carry `data`, `status` and
//! `errors`; a non-empty `errors` array means the command failed even when the
//! HTTP status is 200.

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{ApiError, CollectionSpec, MonsterStore, StoreError, VectorOptions};
use crate::config::{StoreConfig, StoreCredentials};
use crate::monster::types::Monster;

const API_PATH: &str = "api/json/v1";

/// Envelope shared by every Data API response.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "D: Deserialize<'de>, S: Deserialize<'de>"))]
struct CommandResponse<D, S> {
    #[serde(default)]
    data: Option<D>,
    #[serde(default)]
    status: Option<S>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

impl<D, S> CommandResponse<D, S> {
    fn into_result(self) -> Result<Self, StoreError> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(StoreError::Api(self.errors))
        }
    }
}

#[derive(Debug, Deserialize)]
struct FindOneData {
    document: Option<Monster>,
}

#[derive(Debug, Deserialize)]
struct FindData {
    documents: Vec<Monster>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertManyStatus {
    #[serde(default)]
    inserted_ids: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct FindCollectionsStatus {
    collections: Vec<CollectionDescriptor>,
}

#[derive(Debug, Deserialize)]
struct CollectionDescriptor {
    name: String,
    #[serde(default)]
    options: CollectionOptions,
}

#[derive(Debug, Default, Deserialize)]
struct CollectionOptions {
    vector: Option<VectorOptions>,
}

/// [`MonsterStore`] backed by the Data API over HTTPS.
///
/// The underlying `reqwest::Client` pools connections; one instance is created
/// per process and shared.
#[derive(Debug, Clone)]
pub struct DataApiStore {
    client: Client,
    keyspace_url: String,
    collection_url: String,
}

impl DataApiStore {
    pub fn new(credentials: &StoreCredentials, config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::HeaderName::from_static("token"),
            header::HeaderValue::from_str(&credentials.application_token)
                .map_err(|_| StoreError::Config("invalid application token format".into()))?,
        );

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let keyspace_url = format!(
            "{}/{API_PATH}/{}",
            credentials.api_endpoint.trim_end_matches('/'),
            config.keyspace
        );
        let collection_url = format!("{keyspace_url}/{}", config.collection);

        Ok(Self {
            client,
            keyspace_url,
            collection_url,
        })
    }

    /// POST one command and decode the envelope. Does not inspect `errors`.
    async fn command<D, S>(&self, url: &str, command: &Value) -> Result<CommandResponse<D, S>, StoreError>
    where
        D: DeserializeOwned,
        S: DeserializeOwned,
    {
        let name = command
            .as_object()
            .and_then(|c| c.keys().next())
            .map(String::as_str)
            .unwrap_or("?");
        debug!(url = %url, command = name, "data api request");

        let response = self.client.post(url).json(command).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl MonsterStore for DataApiStore {
    async fn create_collection(&self, spec: &CollectionSpec) -> Result<(), StoreError> {
        let mut options = serde_json::Map::new();
        if let Some(vector) = spec.vector {
            options.insert("vector".into(), serde_json::to_value(vector)?);
        }
        let command = json!({
            "createCollection": {
                "name": spec.name,
                "options": options,
            }
        });

        self.command::<Value, Value>(&self.keyspace_url, &command)
            .await?
            .into_result()?;
        Ok(())
    }

    async fn list_collections(&self) -> Result<Vec<CollectionSpec>, StoreError> {
        let command = json!({ "findCollections": { "options": { "explain": true } } });

        let response = self
            .command::<Value, FindCollectionsStatus>(&self.keyspace_url, &command)
            .await?
            .into_result()?;
        let status = response.status.ok_or_else(|| {
            StoreError::UnexpectedResponse("findCollections returned no status".into())
        })?;

        Ok(status
            .collections
            .into_iter()
            .map(|c| CollectionSpec {
                name: c.name,
                vector: c.options.vector,
            })
            .collect())
    }

    async fn insert_many(&self, documents: &[Monster]) -> Result<usize, StoreError> {
        if documents.is_empty() {
            return Ok(0);
        }
        let command = json!({
            "insertMany": {
                "documents": documents,
                "options": { "ordered": false },
            }
        });

        let response = self
            .command::<Value, InsertManyStatus>(&self.collection_url, &command)
            .await?;
        let inserted = response
            .status
            .as_ref()
            .map(|s| s.inserted_ids.len())
            .unwrap_or(0);

        if !response.errors.is_empty() {
            warn!(
                inserted,
                submitted = documents.len(),
                errors = response.errors.len(),
                "insertMany reported errors"
            );
        }
        response.into_result()?;
        Ok(inserted)
    }

    async fn find_one_by_name(&self, name: &str) -> Result<Option<Monster>, StoreError> {
        let command = json!({
            "findOne": {
                "filter": { "name": { "$eq": name } },
                "projection": { "*": 1 },
            }
        });

        let response = self
            .command::<FindOneData, Value>(&self.collection_url, &command)
            .await?
            .into_result()?;
        Ok(response.data.and_then(|d| d.document))
    }

    async fn find_nearest(
        &self,
        vector: &[f64],
        limit: usize,
    ) -> Result<Vec<Monster>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let command = json!({
            "find": {
                "sort": { "$vector": vector },
                "projection": { "*": 1 },
                "options": { "limit": limit, "includeSimilarity": true },
            }
        });

        let response = self
            .command::<FindData, Value>(&self.collection_url, &command)
            .await?
            .into_result()?;
        Ok(response.data.map(|d| d.documents).unwrap_or_default())
    }
}
