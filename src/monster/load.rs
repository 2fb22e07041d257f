//! Bulk loading of monster records into the collection.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use super::types::Monster;
use crate::store::{CollectionSpec, MonsterStore};

/// Outcome of a load run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub collection: String,
    pub submitted: usize,
    pub inserted: usize,
    pub requests: usize,
}

/// Read an input file: a JSON array of monster records.
pub fn read_monsters(path: &Path) -> Result<Vec<Monster>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    parse_monsters(&json).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parse a JSON array of monster records.
pub fn parse_monsters(json: &str) -> Result<Vec<Monster>> {
    let monsters: Vec<Monster> =
        serde_json::from_str(json).context("input must be a JSON array of monster records")?;
    Ok(monsters)
}

/// Attach `$vector` to every record. Fails on the first record with an unusable stat.
pub fn prepare_documents(monsters: Vec<Monster>) -> Result<Vec<Monster>> {
    monsters
        .into_iter()
        .map(|m| m.with_vector().map_err(anyhow::Error::from))
        .collect()
}

/// Create the collection (or confirm it exists) and insert every record.
///
/// Records are sent `chunk_size` per request because the store caps the size of
/// a single `insertMany`. `on_progress` is called with the number of documents
/// inserted by each request. The first store error aborts the run.
pub async fn load_monsters(
    store: &dyn MonsterStore,
    spec: &CollectionSpec,
    monsters: Vec<Monster>,
    chunk_size: usize,
    mut on_progress: impl FnMut(usize),
) -> Result<LoadReport> {
    let documents = prepare_documents(monsters)?;

    store
        .create_collection(spec)
        .await
        .with_context(|| format!("failed to create collection {}", spec.name))?;
    tracing::info!(collection = %spec.name, "collection ready");

    let mut report = LoadReport {
        collection: spec.name.clone(),
        submitted: documents.len(),
        inserted: 0,
        requests: 0,
    };

    if documents.is_empty() {
        tracing::warn!("input contained no records; nothing inserted");
        return Ok(report);
    }

    for chunk in documents.chunks(chunk_size.max(1)) {
        let inserted = store.insert_many(chunk).await.with_context(|| {
            format!(
                "bulk insert failed after {} of {} documents",
                report.inserted, report.submitted
            )
        })?;
        report.inserted += inserted;
        report.requests += 1;
        on_progress(inserted);
    }

    tracing::info!(
        collection = %report.collection,
        inserted = report.inserted,
        requests = report.requests,
        "load complete"
    );
    Ok(report)
}
