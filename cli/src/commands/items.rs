use super::{FormatArg, write_lines};
use crate::config::PipelineConfig;
use anyhow::{Context, Result};
use catalog::{
    OnlineRecord, filter_collection, into_collection, merge_online_fields, parse_feed,
};
use clap::Subcommand;
use codegen::{OutputFormat, render_items};
use enml::EntityCollection;
use enml::process::parse_folder;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Subcommand)]
pub enum ItemsCommands {
    /// Parse item files, backfill from the online feed and write one file per type
    Generate {
        /// Folder with the `.enml` item files
        #[arg(short, long)]
        input: PathBuf,
        /// Online feed URL (optional, overrides the config)
        #[arg(short, long)]
        url: Option<String>,
        /// Skip the online feed
        #[arg(long)]
        offline: bool,
        /// Pipeline config JSON (optional)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output directory (optional, defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = FormatArg::Code)]
        format: FormatArg,
    },
}

pub fn handle(cmd: ItemsCommands) -> Result<()> {
    match cmd {
        ItemsCommands::Generate {
            input,
            url,
            offline,
            config,
            output,
            format,
        } => {
            let config = PipelineConfig::load_or_default(config.as_deref())?;
            let url = url.unwrap_or_else(|| config.feed_url.clone());
            let records = if offline { None } else { fetch_feed(&url) };

            let collection = build_collection(&input, &config, records.as_deref())?;
            let out_dir = output.unwrap_or_else(|| PathBuf::from("."));
            write_collection(&collection, &out_dir, format.into())?;
        }
    }
    Ok(())
}

/// GET the feed. Any failure degrades to local-only data.
pub fn fetch_feed(url: &str) -> Option<Vec<OnlineRecord>> {
    info!("Fetching online item data from {}", url);
    let body = match ureq::get(url).call().map(|resp| resp.into_string()) {
        Ok(Ok(body)) => body,
        Ok(Err(e)) => {
            warn!("Could not read online data, using local data only: {}", e);
            return None;
        }
        Err(e) => {
            warn!("Could not fetch online data, using local data only: {}", e);
            return None;
        }
    };

    match parse_feed(&body) {
        Ok(records) => {
            info!("Retrieved {} online records", records.len());
            Some(records)
        }
        Err(e) => {
            warn!("Unusable online data, using local data only: {}", e);
            None
        }
    }
}

/// Local items, filtered, then backfilled from `records` when available.
/// Without any local item the online records stand in for them.
pub fn build_collection(
    input: &Path,
    config: &PipelineConfig,
    records: Option<&[OnlineRecord]>,
) -> Result<EntityCollection> {
    let parsed = parse_folder(input, &config.file_to_type, &config.keywords)
        .with_context(|| format!("Failed to parse item folder {:?}", input))?;
    super::report_diagnostics(&parsed.diagnostics);

    let local = parsed.data;
    if local.total() == 0 {
        if let Some(records) = records {
            info!("No local items found, using the online feed");
            return Ok(filter_collection(&into_collection(records)));
        }
    }

    let mut collection = filter_collection(&local);
    if let Some(records) = records {
        let stats = merge_online_fields(&mut collection, records);
        info!(
            "Merged online data: {} matched, {} unmatched, {} field(s) copied",
            stats.matched, stats.unmatched, stats.fields_copied
        );
    }
    Ok(collection)
}

/// One output file per type tag known to the formatters.
pub fn write_collection(
    collection: &EntityCollection,
    out_dir: &Path,
    format: OutputFormat,
) -> Result<()> {
    for (tag, entities) in collection.iter() {
        let Some(lines) = render_items(tag, entities, format) else {
            warn!("No formatter for type '{}', skipping {} item(s)", tag, entities.len());
            continue;
        };
        let out_path = out_dir.join(format.file_name(tag));
        write_lines(&out_path, &lines)?;
        println!("Wrote {} {} line(s) to {:?}", lines.len(), tag, out_path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::collect_records;
    use std::fs;

    fn config() -> PipelineConfig {
        PipelineConfig {
            file_to_type: [("rings.enml".to_string(), "ring".to_string())].into(),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_local_items_are_filtered_and_merged() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        fs::write(
            temp_dir.path().join("rings.enml"),
            "item ruby\n{\n\tname = Ruby Ring;\n\tarmor = 1;\n}\nitem ruby_b\n{\n\tname = Ruby Ring B;\n}\n",
        )?;
        let feed: serde_json::Value = serde_json::json!([
            {"type": "ring", "name_en": "Ruby Ring", "freemiumCoinPrice": 300}
        ]);
        let records = collect_records(&feed);

        let collection = build_collection(temp_dir.path(), &config(), Some(&records))?;
        let rings = collection.get("ring");
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].get_f64("freemiumCoinPrice"), Some(300.0));
        Ok(())
    }

    #[test]
    fn test_online_records_stand_in_for_missing_local_items() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let feed =
            serde_json::json!([{"type": "weapon", "secondaryType": "axe", "name": "Big Axe"}]);
        let records = collect_records(&feed);

        let collection = build_collection(temp_dir.path(), &config(), Some(&records))?;
        assert_eq!(collection.get("axe").len(), 1);
        Ok(())
    }

    #[test]
    fn test_write_collection() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let mut collection = EntityCollection::new();
        collection.push("ring", [("name", "Ruby Ring")].into_iter().collect());
        collection.push("shield", [("name", "Oak Shield")].into_iter().collect());

        write_collection(&collection, temp_dir.path(), OutputFormat::Human)?;
        assert!(temp_dir.path().join("ring_summary.txt").exists());
        assert!(!temp_dir.path().join("shield_summary.txt").exists());
        Ok(())
    }
}
