use anyhow::Result;

use bestiary::config::BestiaryConfig;
use bestiary::monster::lookup;
use bestiary::store;

/// Print one monster as JSON, or `null` when it does not exist.
pub async fn get(config: &BestiaryConfig, name: &str) -> Result<()> {
    let store = store::open_store(&config.store)?;
    let monster = lookup::get_monster(&store, name).await?;
    println!("{}", serde_json::to_string_pretty(&monster)?);
    Ok(())
}

/// Print the nearest neighbors of a monster as a compact table.
pub async fn similar(config: &BestiaryConfig, name: &str, json: bool) -> Result<()> {
    let store = store::open_store(&config.store)?;
    let monsters =
        lookup::find_similar_monsters(&store, name, config.search.similar_limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&monsters)?);
        return Ok(());
    }

    println!("Monsters similar to {name} ({} found)\n", monsters.len());
    for (i, monster) in monsters.iter().enumerate() {
        let stats = monster
            .stats()
            .iter()
            .map(|(_, v)| v.to_string())
            .collect::<Vec<_>>()
            .join("/");
        match monster.similarity {
            Some(score) => println!(
                "  {:>2}. {:<28} [{}] (similarity: {:.4})",
                i + 1,
                monster.name,
                stats,
                score
            ),
            None => println!("  {:>2}. {:<28} [{}]", i + 1, monster.name, stats),
        }
    }

    Ok(())
}
