use anyhow::{Context, Result};

use crate::config::{self, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  catalog_path: {}", config.catalog_path.display());
    println!("  page_size: {}", config.page_size);
    println!("  logging.level: {:?}", config.logging.level());
    println!("  logging.coloured: {}", config.logging.coloured());
    println!("  logging.output: {:?}", config.logging.output());

    println!("\nPriority: CLI args > ENV vars (TIMBRE_*) > Config file > Defaults");

    Ok(())
}

/// Get a specific config value, or print the whole file.
pub fn get_config(config: &Config, key: Option<String>) -> Result<()> {
    let Some(key) = key else {
        let config_path = config::config_file_path();
        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'timbre config init' to create it.");
        }
        return Ok(());
    };

    match key.as_str() {
        "catalog_path" => println!("{}", config.catalog_path.display()),
        "page_size" => println!("{}", config.page_size),
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\nValid keys: catalog_path, page_size",
                key
            );
        }
    }

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure timbre.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
