//! Load command handler

use anyhow::Result;
use colored::*;
use std::time::Instant;

use super::LoadCommands;
use crate::config::Config;
use crate::ingest::{Aggregates, Loader, SourceFile, read_sources};

/// Build the effective config: file values (or defaults), then flag overrides
pub fn resolve_config(args: &LoadCommands) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(database) = &args.database {
        config.database = database.clone();
    }
    if let Some(folder) = &args.data_folder {
        config.data_folder = folder.clone();
    }
    if args.create_schema {
        config.create_schema = true;
    }

    Ok(config)
}

/// Run one load of the configured data folder
pub async fn handle_load_command(args: LoadCommands) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = resolve_config(&args)?;

    if !config.data_folder.is_dir() {
        anyhow::bail!(
            "Data folder does not exist: {}",
            config.data_folder.display()
        );
    }

    let sources = SourceFile::standard_set(&config.data_folder);
    let start = Instant::now();

    if args.dry_run {
        let aggregates = read_sources(&sources, &config.columns)?;
        println!("{} {}", "Dry run:".yellow().bold(), dry_run_report(&aggregates));
        return Ok(());
    }

    println!(
        "Loading {} into {}",
        config.data_folder.display().to_string().cyan(),
        config.database.display().to_string().cyan()
    );

    let loader = Loader::connect(&config).await?;
    let result = loader.populate(&config.data_folder).await;
    loader.close().await;
    let summary = result?;

    println!("{} {}", "Loaded:".bright_green().bold(), summary);
    println!(
        "{}",
        format!("Finished in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0).dimmed()
    );

    Ok(())
}

/// What a load would write, without insert counts
pub fn dry_run_report(aggregates: &Aggregates) -> String {
    format!(
        "{} rows read; {} products, {} shipments and {} shipment products seen; nothing written",
        aggregates.rows_read,
        aggregates.product_names.len(),
        aggregates.shipments.len(),
        aggregates.shipment_product_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_config_defaults() {
        let config = resolve_config(&LoadCommands::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("shipload.toml");
        fs::write(
            &config_path,
            "database = \"from-file.db\"\ndata_folder = \"file-data\"\n",
        )
        .unwrap();

        let args = LoadCommands {
            config: Some(config_path),
            data_folder: Some(PathBuf::from("flag-data")),
            create_schema: true,
            ..LoadCommands::default()
        };
        let config = resolve_config(&args).unwrap();

        assert_eq!(config.database, PathBuf::from("from-file.db"));
        assert_eq!(config.data_folder, PathBuf::from("flag-data"));
        assert!(config.create_schema);
    }

    #[test]
    fn test_dry_run_report_counts_seen_only() {
        let mut aggregates = Aggregates::new();
        aggregates.rows_read = 4;
        aggregates.add_product("Widget");
        aggregates.add_shipment_row("S1", "W", "St", "Widget");
        aggregates.add_shipment_row("S1", "W", "St", "Gadget");
        aggregates.add_shipment_row("S2", "W", "St", "Widget");

        let report = dry_run_report(&aggregates);

        assert_eq!(
            report,
            "4 rows read; 1 products, 2 shipments and 3 shipment products seen; nothing written"
        );
        assert!(!report.contains("inserted"));
    }

    #[tokio::test]
    async fn test_missing_data_folder() {
        let dir = TempDir::new().unwrap();
        let args = LoadCommands {
            database: Some(dir.path().join("db.sqlite")),
            data_folder: Some(dir.path().join("absent")),
            ..LoadCommands::default()
        };

        let err = handle_load_command(args).await.unwrap_err();
        assert!(err.to_string().contains("Data folder does not exist"));
    }

    #[tokio::test]
    async fn test_dry_run_does_not_touch_database() {
        let dir = TempDir::new().unwrap();
        for (index, contents) in ["h0,h1,h2\na,b,Widget\n", "h0,h1,h2\nS1,W,St\n", "h0,h1,h2\n"]
            .iter()
            .enumerate()
        {
            fs::write(dir.path().join(format!("shipping_data_{}.csv", index)), contents).unwrap();
        }
        let database = dir.path().join("db.sqlite");
        let args = LoadCommands {
            database: Some(database.clone()),
            data_folder: Some(dir.path().to_path_buf()),
            dry_run: true,
            no_color: true,
            ..LoadCommands::default()
        };

        handle_load_command(args).await.unwrap();
        assert!(!database.exists());
    }

    #[tokio::test]
    async fn test_load_with_schema_creation() {
        let dir = TempDir::new().unwrap();
        for (index, contents) in ["h0,h1,h2\na,b,Widget\n", "h0,h1,h2\nS1,W,St\n", "h0,h1,h2\n"]
            .iter()
            .enumerate()
        {
            fs::write(dir.path().join(format!("shipping_data_{}.csv", index)), contents).unwrap();
        }
        let database = dir.path().join("db.sqlite");
        let args = LoadCommands {
            database: Some(database.clone()),
            data_folder: Some(dir.path().to_path_buf()),
            create_schema: true,
            no_color: true,
            ..LoadCommands::default()
        };

        handle_load_command(args).await.unwrap();
        assert!(database.exists());
    }
}
