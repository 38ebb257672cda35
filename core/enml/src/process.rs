use crate::error::{EnmlError, Result};
use crate::reader::{BlockExtractor, normalize_block};
use crate::types::{Diagnostics, Entity, EntityCollection, Parsed};
use crate::writer::write_blocks;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extract and normalize every block of one source text.
///
/// Unterminated blocks and malformed lines end up in `diagnostics`; blocks
/// without a single `key = value` line are dropped.
pub fn parse_source<S: AsRef<str>>(
    text: &str,
    source: &str,
    keywords: &[S],
    diagnostics: &mut Diagnostics,
) -> Vec<Entity> {
    let mut entities = Vec::new();
    for block in BlockExtractor::new(text, keywords) {
        match block {
            Ok(block) => {
                let entity = normalize_block(&block, source, diagnostics);
                if entity.is_empty() {
                    debug!(
                        "{}:{}: skipping empty block '{}'",
                        source, block.line, block.identifier
                    );
                    continue;
                }
                entities.push(entity);
            }
            Err(EnmlError::UnterminatedBlock { identifier, line }) => {
                diagnostics.warn(source, Some(line), format!("Unterminated block '{identifier}'"));
            }
            Err(e) => diagnostics.warn(source, None, e.to_string()),
        }
    }
    entities
}

/// Parse a single ENML file.
pub fn parse_file<S: AsRef<str>>(path: &Path, keywords: &[S]) -> Result<Parsed<Vec<Entity>>> {
    if !path.exists() {
        return Err(EnmlError::InputNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let mut diagnostics = Diagnostics::new();
    let source = path.display().to_string();
    let entities = parse_source(&content, &source, keywords, &mut diagnostics);
    Ok(Parsed::new(entities, diagnostics))
}

/// Parse the `.enml` files of `folder` that appear in `file_to_type`,
/// grouping their entities under the mapped type tag.
///
/// A missing folder is fatal; unreadable files and problems inside files
/// are reported to the diagnostics and skipped.
pub fn parse_folder<S: AsRef<str>>(
    folder: &Path,
    file_to_type: &BTreeMap<String, String>,
    keywords: &[S],
) -> Result<Parsed<EntityCollection>> {
    if !folder.is_dir() {
        return Err(EnmlError::InputNotFound(folder.to_path_buf()));
    }

    let mut collection = EntityCollection::with_tags(file_to_type.values().cloned());
    let mut diagnostics = Diagnostics::new();

    let mut files: Vec<PathBuf> = fs::read_dir(folder)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    for path in files {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.ends_with(".enml") {
            continue;
        }
        let Some(tag) = file_to_type.get(file_name) else {
            debug!("Skipping unmapped file {}", file_name);
            continue;
        };

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                diagnostics.warn(file_name, None, format!("Skipping unreadable file: {e}"));
                continue;
            }
        };
        let entities = parse_source(&content, file_name, keywords, &mut diagnostics);
        info!("Parsed {} {}(s) from {}", entities.len(), tag, file_name);
        for entity in entities {
            collection.push(tag, entity);
        }
    }

    Ok(Parsed::new(collection, diagnostics))
}

pub fn enml_decode<S: AsRef<str>>(
    input: &Path,
    output: &Option<PathBuf>,
    keywords: &[S],
) -> Result<()> {
    // Decode ENML -> JSON
    let parsed = parse_file(input, keywords)?;

    let out_path = match output {
        Some(p) => p.clone(),
        None => input.with_extension("json"),
    };

    fs::write(&out_path, serde_json::to_string_pretty(&parsed.data)?)?;
    println!(
        "Decoded {} block(s) to {:?} ({} warning(s))",
        parsed.data.len(),
        out_path,
        parsed.diagnostics.len()
    );
    Ok(())
}

pub fn enml_encode(input: &Path, output: &Option<PathBuf>, keyword: &str) -> Result<()> {
    // Encode JSON -> ENML
    let content = fs::read_to_string(input)?;
    let entities: Vec<Entity> = serde_json::from_str(&content)?;

    let out_path = match output {
        Some(p) => p.clone(),
        None => input.with_extension("enml"),
    };

    fs::write(&out_path, write_blocks(keyword, &entities))?;
    println!("Encoded {} block(s) to {:?}", entities.len(), out_path);
    Ok(())
}
