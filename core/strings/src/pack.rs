//! The game's `.strings` language packs: one folder per language code,
//! each holding `key = value;` files.

use crate::ENGLISH;
use crate::error::{Result, StringsError};
use crate::key::{key_base_and_num, norm_key};
use crate::template::normalize_template;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub const PACK_EXTENSION: &str = "strings";

/// `(key, value)` of a pack line, quotes and the trailing `;` removed.
/// Comments, lines without `=` and lines with an empty key yield nothing.
pub fn parse_pack_line(line: &str) -> Option<(&str, &str)> {
    if line.trim_start().starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim().trim_matches(['\'', '"']);
    let value = value.trim().trim_matches([';', '\'', '"']);
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Contents of every pack file under `dir`, sorted by path. Unreadable
/// files are logged and skipped.
fn read_pack_files(dir: &Path, min_depth: usize) -> Vec<(PathBuf, String)> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(min_depth).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping pack entry under {:?}: {}", dir, e);
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|e| e.to_str()) != Some(PACK_EXTENSION)
        {
            continue;
        }
        match fs::read_to_string(path) {
            Ok(content) => files.push((path.to_path_buf(), strip_bom(content))),
            Err(e) => warn!("Skipping unreadable pack file {:?}: {}", path, e),
        }
    }
    files
}

fn strip_bom(content: String) -> String {
    const BOM: char = '\u{feff}';
    if content.starts_with(BOM) {
        content[BOM.len_utf8()..].to_string()
    } else {
        content
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Where an English string lives in the pack.
#[derive(Debug, Clone, PartialEq)]
pub struct PackLocation {
    pub key: String,
    pub file: String,
}

/// English pack indexed by key and by text template. Later lines win.
#[derive(Debug, Default)]
pub struct EnglishPack {
    keys: HashMap<String, PackLocation>,
    texts: HashMap<String, PackLocation>,
}

impl EnglishPack {
    pub fn load(dir: &Path) -> Result<Self> {
        let mut pack = Self::default();
        if !dir.is_dir() {
            warn!("English pack not found at {:?}", dir);
            return Ok(pack);
        }
        for (path, content) in read_pack_files(dir, 1) {
            pack.add_file(&file_name(&path), &content)?;
        }
        info!(
            "English pack: {} key(s), {} text template(s)",
            pack.keys.len(),
            pack.texts.len()
        );
        Ok(pack)
    }

    pub fn add_file(&mut self, file: &str, content: &str) -> Result<()> {
        for (key, value) in content.lines().filter_map(parse_pack_line) {
            let location = PackLocation {
                key: key.to_string(),
                file: file.to_string(),
            };
            if !value.is_empty() {
                self.texts
                    .insert(normalize_template(value)?, location.clone());
            }
            self.keys.insert(norm_key(key), location);
        }
        Ok(())
    }

    /// Pack entry for a string: by its name, otherwise by its text.
    pub fn locate(&self, name: &str, text: &str) -> Result<Option<&PackLocation>> {
        if let Some(location) = self.keys.get(&norm_key(name)) {
            return Ok(Some(location));
        }
        Ok(self.texts.get(&normalize_template(text)?))
    }
}

/// Translations of one language.
#[derive(Debug, Default)]
pub struct LanguagePack {
    /// File name to normalized key to value; later lines win.
    files: HashMap<String, HashMap<String, String>>,
    /// Normalized key to value; the first occurrence wins.
    index: HashMap<String, String>,
    /// Key base to trailing digits to value; the first occurrence wins.
    families: HashMap<String, HashMap<String, String>>,
}

impl LanguagePack {
    /// Lines with an empty value are skipped.
    pub fn add_file(&mut self, file: &str, content: &str) {
        let by_key = self.files.entry(file.to_string()).or_default();
        for (key, value) in content.lines().filter_map(parse_pack_line) {
            if value.is_empty() {
                continue;
            }
            let normalized = norm_key(key);
            by_key.insert(normalized.clone(), value.to_string());
            self.index
                .entry(normalized.clone())
                .or_insert_with(|| value.to_string());
            if let (base, Some(digits)) = key_base_and_num(&normalized) {
                self.families
                    .entry(base)
                    .or_default()
                    .entry(digits)
                    .or_insert_with(|| value.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn by_key(&self, normalized: &str) -> Option<&str> {
        self.index.get(normalized).map(String::as_str)
    }

    pub fn in_file(&self, file: &str, normalized: &str) -> Option<&str> {
        self.files.get(file)?.get(normalized).map(String::as_str)
    }

    /// Member of a numbered key family: the exact number when present,
    /// otherwise the lowest one.
    pub fn family(&self, base: &str, digits: Option<&str>) -> Option<&str> {
        let family = self.families.get(base)?;
        if let Some(value) = digits.and_then(|d| family.get(d)) {
            return Some(value.as_str());
        }
        family
            .iter()
            .min_by(|(a, _), (b, _)| numeric_order(a).cmp(&numeric_order(b)))
            .map(|(_, value)| value.as_str())
    }
}

/// Sort key comparing digit strings by value, then by spelling.
fn numeric_order(digits: &str) -> (usize, &str, &str) {
    let significant = digits.trim_start_matches('0');
    (significant.len(), significant, digits)
}

/// Translation packs per language code.
#[derive(Debug, Default)]
pub struct TranslationPacks {
    languages: BTreeMap<String, LanguagePack>,
}

impl TranslationPacks {
    /// Packs of `languages` under `lang_dir`. Files directly in `lang_dir`,
    /// the English pack and other languages are ignored.
    pub fn load<S: AsRef<str>>(lang_dir: &Path, languages: &[S]) -> Result<Self> {
        if !lang_dir.is_dir() {
            return Err(StringsError::InputNotFound(lang_dir.to_path_buf()));
        }
        let mut packs = Self::default();
        for (path, content) in read_pack_files(lang_dir, 2) {
            let Some(language) = path
                .strip_prefix(lang_dir)
                .ok()
                .and_then(|rel| rel.components().next())
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
            else {
                continue;
            };
            if language == ENGLISH || !languages.iter().any(|l| l.as_ref() == language) {
                debug!("Ignoring pack file {:?}", path);
                continue;
            }
            packs.add_file(&language, &file_name(&path), &content);
        }
        for (language, pack) in &packs.languages {
            info!("Language '{}': {} translated key(s)", language, pack.len());
        }
        Ok(packs)
    }

    pub fn add_file(&mut self, language: &str, file: &str, content: &str) {
        self.languages
            .entry(language.to_string())
            .or_default()
            .add_file(file, content);
    }

    pub fn get(&self, language: &str) -> Option<&LanguagePack> {
        self.languages.get(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pack_line() {
        assert_eq!(parse_pack_line("title = 'Dungeon';"), Some(("title", "Dungeon")));
        assert_eq!(parse_pack_line("\"a_b\"=\"x = y\";"), Some(("a_b", "x = y")));
        assert_eq!(parse_pack_line("  # note = skipped"), None);
        assert_eq!(parse_pack_line("no separator"), None);
        assert_eq!(parse_pack_line(" = orphan"), None);
        assert_eq!(parse_pack_line("empty ="), Some(("empty", "")));
    }

    #[test]
    fn test_english_pack_locate() -> Result<()> {
        let mut pack = EnglishPack::default();
        pack.add_file("menu.strings", "Play-Game = Play;\nrestore_hp = Restores 30 HP.;\n")?;
        pack.add_file("shop.strings", "play_game = Play now;\n")?;

        let by_key = pack.locate("PLAY_GAME", "unrelated")?;
        assert_eq!(by_key.map(|l| l.file.as_str()), Some("shop.strings"));

        let by_text = pack.locate("potion_desc", "Restores 45 HP")?;
        assert_eq!(by_text.map(|l| l.key.as_str()), Some("restore_hp"));

        assert!(pack.locate("missing", "Nothing like it")?.is_none());
        Ok(())
    }

    #[test]
    fn test_language_pack_lookups() {
        let mut pack = LanguagePack::default();
        pack.add_file("a.strings", "greet = Hallo;\nskin7 = Haut 7;\nskin3 = Haut 3;\nblank = ;\n");
        pack.add_file("b.strings", "greet = Servus;\nskin3 = Andere Haut;\n");

        assert_eq!(pack.by_key("greet"), Some("Hallo"));
        assert_eq!(pack.in_file("b.strings", "greet"), Some("Servus"));
        assert_eq!(pack.in_file("c.strings", "greet"), None);
        assert_eq!(pack.by_key("blank"), None);

        assert_eq!(pack.family("skin", Some("7")), Some("Haut 7"));
        assert_eq!(pack.family("skin", Some("19")), Some("Haut 3"));
        assert_eq!(pack.family("skin", None), Some("Haut 3"));
        assert_eq!(pack.family("hat", Some("1")), None);
    }

    #[test]
    fn test_numeric_order() {
        assert!(numeric_order("9") < numeric_order("10"));
        assert!(numeric_order("007") < numeric_order("10"));
    }
}
