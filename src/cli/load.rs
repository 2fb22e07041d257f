//! CLI `load` command: bulk-load a JSON file of monsters into the collection.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use bestiary::config::BestiaryConfig;
use bestiary::monster::load::{load_monsters, read_monsters};
use bestiary::store::{self, CollectionSpec};

/// Read `file`, derive vectors, create the collection and insert every record.
pub async fn load(config: &BestiaryConfig, file: &Path) -> Result<()> {
    let monsters = read_monsters(file)?;
    let store = store::open_store(&config.store)?;
    let spec = CollectionSpec::monsters(config.store.collection.clone());

    println!(
        "Loading {} monsters into collection {}...",
        monsters.len(),
        spec.name
    );

    let pb = ProgressBar::new(monsters.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:40.cyan/blue} {pos}/{len} documents")
            .context("invalid progress template")?
            .progress_chars("##-"),
    );

    let result = load_monsters(
        &store,
        &spec,
        monsters,
        config.store.insert_chunk_size,
        |inserted| pb.inc(inserted as u64),
    )
    .await;
    pb.finish_and_clear();
    // The store handle (and its connection pool) is released here, on success or failure.
    drop(store);

    let report = result?;
    println!("Load complete:");
    println!("  Collection:        {}", report.collection);
    println!("  Records read:      {}", report.submitted);
    println!("  Documents stored:  {}", report.inserted);
    println!("  Insert requests:   {}", report.requests);

    Ok(())
}
