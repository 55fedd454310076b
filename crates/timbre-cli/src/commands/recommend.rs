use anyhow::{Context, Result};
use serde::Serialize;
use timbre_core::{CatalogIndex, FEATURE_NAMES};
use timbre_search::{paginate, recommend_query, Page, Query, Recommendation};

/// Arguments for `timbre recommend`.
#[derive(Debug, clap::Args)]
pub struct RecommendArgs {
    /// Genre to recommend from (case-insensitive, see `timbre genres`)
    #[arg(long, default_value = "K-pop")]
    pub genre: String,

    /// First release year to include
    #[arg(long, default_value_t = 2010)]
    pub start_year: i32,

    /// Last release year to include
    #[arg(long, default_value_t = 2019)]
    pub end_year: i32,

    /// Target acousticness (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    pub acousticness: f64,

    /// Target danceability (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    pub danceability: f64,

    /// Target energy (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    pub energy: f64,

    /// Target instrumentalness (0.0-1.0)
    #[arg(long, default_value_t = 0.0)]
    pub instrumentalness: f64,

    /// Target valence (0.0-1.0)
    #[arg(long, default_value_t = 0.45)]
    pub valence: f64,

    /// Target tempo in BPM (0-244)
    #[arg(long, default_value_t = 118.0)]
    pub tempo: f64,

    /// Page of results to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

impl RecommendArgs {
    fn features(&self) -> [f64; 6] {
        [
            self.acousticness,
            self.danceability,
            self.energy,
            self.instrumentalness,
            self.valence,
            self.tempo,
        ]
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    genre: &'static str,
    start_year: i32,
    end_year: i32,
    #[serde(flatten)]
    page: Page<'a, Recommendation>,
}

impl<'a> JsonOutput<'a> {
    fn new(query: &Query, page: Page<'a, Recommendation>) -> Self {
        Self {
            genre: query.genre().display_name(),
            start_year: query.years().start(),
            end_year: query.years().end(),
            page,
        }
    }
}

pub fn run_recommend(index: &CatalogIndex, args: &RecommendArgs, page_size: usize) -> Result<()> {
    let query = Query::parse(&args.genre, args.start_year, args.end_year, &args.features())
        .context("Invalid recommendation query")?;
    let genre = query.genre().display_name();
    let years = query.years();
    log::info!("Recommending {} tracks from {}", genre, years);

    let results = recommend_query(index, &query);
    let page = paginate(&results, args.page, page_size);

    if args.json {
        let output = JsonOutput::new(&query, page);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if results.is_empty() {
        println!(
            "No {} tracks released between {} and {}",
            genre,
            years.start(),
            years.end()
        );
        return Ok(());
    }

    if page.items.is_empty() {
        println!("No songs left to recommend");
        return Ok(());
    }

    println!(
        "\n🎵 {} recommendations, {} (page {} of {}, {} tracks)\n",
        genre,
        years,
        page.number,
        page.total_pages(),
        page.total
    );
    for (rank, item) in (page.offset() + 1..).zip(page.items) {
        print_recommendation(rank, item);
    }
    if page.has_next() {
        println!("  Next: timbre recommend --page {} ...", page.number + 1);
    }

    Ok(())
}

fn print_recommendation(rank: usize, item: &Recommendation) {
    println!(
        "  {rank:>3}. {}  (distance {:.3}, popularity {}, {})",
        item.uri, item.distance, item.popularity, item.release_year
    );
    let profile: Vec<String> = FEATURE_NAMES
        .iter()
        .zip(item.features.as_array())
        .map(|(name, value)| format!("{name} {value:.2}"))
        .collect();
    println!("       {}\n", profile.join("  "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: RecommendArgs,
    }

    #[test]
    fn test_default_target_profile() {
        let args = Harness::parse_from(["timbre"]).args;
        assert_eq!(args.genre, "K-pop");
        assert_eq!((args.start_year, args.end_year), (2010, 2019));
        assert_eq!(args.features(), [0.5, 0.5, 0.5, 0.0, 0.45, 118.0]);
        assert_eq!(args.page, 1);
        assert!(!args.json);
    }

    #[test]
    fn test_overrides() {
        let args = Harness::parse_from([
            "timbre", "--genre", "Rock", "--tempo", "90", "--page", "3", "--json",
        ])
        .args;
        assert_eq!(args.genre, "Rock");
        assert!((args.tempo - 90.0).abs() < f64::EPSILON);
        assert_eq!(args.page, 3);
        assert!(args.json);
    }

    #[test]
    fn test_invalid_genre_is_reported() {
        let index = CatalogIndex::default();
        let args = Harness::parse_from(["timbre", "--genre", "Polka"]).args;
        assert!(run_recommend(&index, &args, 5).is_err());
    }

    #[test]
    fn test_json_output_uses_canonical_genre() {
        let args = Harness::parse_from(["timbre", "--genre", "  r&B "]).args;
        let query =
            Query::parse(&args.genre, args.start_year, args.end_year, &args.features()).unwrap();
        let output = JsonOutput::new(&query, paginate::<Recommendation>(&[], 1, 5));

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["genre"], "R&B");
        assert_eq!(value["start_year"], 2010);
        assert_eq!(value["end_year"], 2019);
        assert_eq!(value["total"], 0);
    }

    #[test]
    fn test_empty_catalog_is_not_an_error() {
        let index = CatalogIndex::default();
        let args = Harness::parse_from(["timbre"]).args;
        assert!(run_recommend(&index, &args, 5).is_ok());
    }
}
