//! CLI `doctor` command: check store connectivity and the collection's vector settings.

use anyhow::{Context, Result};

use bestiary::config::BestiaryConfig;
use bestiary::store::{self, CollectionSpec, MonsterStore};

/// Run store diagnostics and print a health report.
pub async fn doctor(config: &BestiaryConfig) -> Result<()> {
    let credentials = config.store.credentials()?;
    let store = store::open_store(&config.store)?;

    println!("Bestiary Health Report");
    println!("======================");
    println!();
    println!("Endpoint:          {}", credentials.api_endpoint);
    println!("Keyspace:          {}", config.store.keyspace);
    println!("Collection:        {}", config.store.collection);
    println!();

    let collections = store
        .list_collections()
        .await
        .context("failed to list collections (check endpoint and token)")?;
    println!("Connectivity:      OK ({} collections)", collections.len());

    let expected = CollectionSpec::monsters(config.store.collection.clone());
    match collections.iter().find(|c| c.name == expected.name) {
        None => {
            println!("Collection status: MISSING");
            println!("Run `bestiary load <file>` to create and populate it.");
        }
        Some(found) if found.vector == expected.vector => {
            println!("Collection status: OK (dimension 7, euclidean)");
        }
        Some(found) => {
            let actual = found
                .vector
                .map(|v| format!("dimension {}, {}", v.dimension, v.metric))
                .unwrap_or_else(|| "no vector settings".into());
            println!("Collection status: MISMATCH ({actual})");
            println!("Vector settings cannot change after creation; load into a new collection.");
        }
    }

    Ok(())
}
