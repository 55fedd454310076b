use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;

use config::Config;

#[derive(Debug, Parser)]
#[command(name = "timbre", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the track catalog CSV (default: ~/.local/share/timbre/tracks.csv)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Recommend tracks close to a target audio feature profile
    ///
    /// Loads the catalog, keeps the tracks tagged with the chosen genre and
    /// released within the year range, narrows them to the 500 most popular,
    /// and ranks every remaining track by Euclidean distance to the target
    /// profile over six axes: acousticness, danceability, energy,
    /// instrumentalness, valence and tempo.
    ///
    /// Results are printed one page at a time; use --page to move through
    /// them. A genre/era combination with no tracks prints an empty result
    /// rather than an error.
    Recommend(commands::RecommendArgs),
    /// List the recognized genres and how many catalog tracks each has
    Genres,
    /// Show catalog load statistics
    Stats,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print one value, or the whole config file
    Get {
        /// Key to print (catalog_path, page_size)
        key: Option<String>,
    },
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_with_catalog_path(cli.catalog)?;
    twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e:?}"))?;

    match cli.command {
        Commands::Recommend(args) => {
            let index = commands::load_catalog(&config.catalog_path)?;
            commands::run_recommend(&index, &args, config.page_size)?;
        }
        Commands::Genres => {
            let index = commands::load_catalog(&config.catalog_path)?;
            commands::list_genres(&index)?;
        }
        Commands::Stats => {
            let index = commands::load_catalog(&config.catalog_path)?;
            commands::show_stats(&index, &config.catalog_path)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config)?,
            ConfigAction::Get { key } => commands::config::get_config(&config, key)?,
            ConfigAction::Path => commands::config::show_path()?,
            ConfigAction::Example => commands::config::show_example()?,
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_catalog_flag() {
        let cli = Cli::parse_from(["timbre", "genres", "--catalog", "/data/tracks.csv"]);
        assert_eq!(cli.catalog, Some(PathBuf::from("/data/tracks.csv")));
        assert!(matches!(cli.command, Commands::Genres));
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::parse_from(["timbre", "config", "get", "page_size"]);
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Get { key: Some(ref k) }
            } if k == "page_size"
        ));
    }
}
