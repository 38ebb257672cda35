//! Text templates used to match English strings and to rebuild translations.

use crate::PRESERVED_TAGS;
use crate::error::{Result, StringsError};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Stand-in for numbers and value tags in a matching template.
pub const PLACEHOLDER: &str = "<ph>";

fn number_or_tag_regex() -> Result<&'static Regex> {
    static NUMBER_OR_TAG: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    NUMBER_OR_TAG
        .get_or_init(|| Regex::new(r"([\d.]+)|(<[^>]+>)"))
        .as_ref()
        .map_err(|e| StringsError::Regex(e.clone()))
}

fn tag_regex() -> Result<&'static Regex> {
    static TAG: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>"))
        .as_ref()
        .map_err(|e| StringsError::Regex(e.clone()))
}

fn inject_regex() -> Result<&'static Regex> {
    static INJECT: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    INJECT
        .get_or_init(|| Regex::new(r"[\d.]+|<new-game-plus>"))
        .as_ref()
        .map_err(|e| StringsError::Regex(e.clone()))
}

fn is_preserved(tag: &str) -> bool {
    PRESERVED_TAGS.contains(&tag.trim_matches(['<', '>']))
}

/// Matching template of a text: lowercase and trimmed, trailing `.`/`;`
/// removed, numbers and value tags replaced by [`PLACEHOLDER`], other tags
/// dropped.
pub fn normalize_template(text: &str) -> Result<String> {
    let re = number_or_tag_regex()?;
    let lowered = text.to_lowercase();
    let cleaned = lowered
        .trim()
        .trim_end_matches(['.', ';'])
        .replace("\\%", "%");

    let template = re.replace_all(&cleaned, |caps: &Captures| {
        if caps.get(1).is_some() {
            return PLACEHOLDER;
        }
        let tag = caps.get(2).map_or("", |m| m.as_str());
        if tag.trim_matches(['<', '>']).starts_with("number") || is_preserved(tag) {
            PLACEHOLDER
        } else {
            ""
        }
    });
    Ok(template.into_owned())
}

/// Numbers and preserved tags of an English text, in order of appearance.
pub fn inject_values(text: &str) -> Result<Vec<String>> {
    let re = inject_regex()?;
    Ok(re.find_iter(text).map(|m| m.as_str().to_string()).collect())
}

/// Translation text with the tags of `template` filled from `inject` in
/// order. Tags left over once `inject` runs out stay in place, and every
/// tag that is not preserved is removed afterwards.
pub fn fill_template(template: &str, inject: &[String]) -> Result<String> {
    let re = tag_regex()?;
    let mut values = inject.iter();
    let injected = re.replace_all(template, |caps: &Captures| {
        values
            .next()
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    });
    let cleaned = re.replace_all(&injected, |caps: &Captures| {
        if is_preserved(&caps[0]) {
            caps[0].to_string()
        } else {
            String::new()
        }
    });
    Ok(cleaned.replace(" .", " ").trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_template() -> Result<()> {
        assert_eq!(
            normalize_template("Deals 12.5 <b>fire</b> damage.")?,
            "deals <ph> fire damage"
        );
        assert_eq!(
            normalize_template("  Unlocks at <number_level> in <new-game-plus>;")?,
            "unlocks at <ph> in <ph>"
        );
        assert_eq!(normalize_template("100\\% Chance")?, "<ph>% chance");
        Ok(())
    }

    #[test]
    fn test_english_and_pack_texts_share_a_template() -> Result<()> {
        assert_eq!(
            normalize_template("Restores 30 HP.")?,
            normalize_template("restores <number> HP")?
        );
        Ok(())
    }

    #[test]
    fn test_inject_values() -> Result<()> {
        assert_eq!(
            inject_values("Gain 3 lives and 2.5x gold in <new-game-plus> <b>now</b>")?,
            vec!["3", "2.5", "<new-game-plus>"]
        );
        assert!(inject_values("No numbers here")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_fill_template() -> Result<()> {
        let inject = vec!["3".to_string(), "<new-game-plus>".to_string()];
        assert_eq!(
            fill_template("Gewinne <n> Leben in <tag> <color=red>.", &inject)?,
            "Gewinne 3 Leben in <new-game-plus>"
        );
        assert_eq!(fill_template("<i>Bonjour</i> <n>", &[])?, "Bonjour");
        Ok(())
    }
}
