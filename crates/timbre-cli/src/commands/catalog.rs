use std::path::Path;

use anyhow::{Context, Result};
use timbre_core::{CatalogIndex, Genre};

/// How many labels `timbre stats` lists.
const TOP_GENRES: usize = 10;

pub fn load_catalog(path: &Path) -> Result<CatalogIndex> {
    CatalogIndex::load(path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))
}

/// List the recognized genres with their entry counts.
pub fn list_genres(index: &CatalogIndex) -> Result<()> {
    println!("Recognized genres:");
    for genre in Genre::ALL {
        let count = index.entries_for_genre(&genre.catalog_label()).count();
        println!("  {:<12} {count:>7} tracks", genre.display_name());
    }
    Ok(())
}

/// Show catalog build statistics.
pub fn show_stats(index: &CatalogIndex, path: &Path) -> Result<()> {
    let stats = index.stats();

    println!("\n📊 Timbre Catalog\n");
    println!("  Catalog: {}", path.display());
    println!("  Rows read: {}", stats.rows_read);
    println!("  Rows skipped: {}", stats.rows_skipped);
    println!("  Tracks: {}", stats.tracks);
    println!("  Genre entries: {}", stats.entries);

    let mut counts = index.genre_counts();
    println!("  Distinct genre labels: {}", counts.len());

    if stats.rows_skipped > 0 {
        let share = stats.rows_skipped as f64 / stats.rows_read as f64 * 100.0;
        println!("\n  ⚠ {share:.1}% of rows were malformed and skipped (see warnings in the log)");
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    if !counts.is_empty() {
        println!("\n  Largest genres:");
        for (label, count) in counts.into_iter().take(TOP_GENRES) {
            println!("    {label:<24} {count:>7}");
        }
    }

    Ok(())
}
