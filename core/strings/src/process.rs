use crate::ENGLISH;
use crate::error::{Result, StringsError};
use crate::key::{key_base_and_num, norm_key};
use crate::pack::{EnglishPack, LanguagePack, TranslationPacks};
use crate::source::{SourceString, parse_strings_xml};
use crate::template::fill_template;
use crate::writer::{escape_text, escape_translation, write_resources};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// File name of every written resources document.
pub const STRINGS_FILE: &str = "strings.xml";
/// Strings no language could translate, in English.
pub const UNMATCHED_FILE: &str = "unmatched.xml";

/// Keys under which the translations of one string are looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    target: String,
    /// Normalized English pack key and its file.
    anchor: Option<(String, String)>,
    base: String,
    digits: Option<String>,
}

impl Lookup {
    pub fn new(source: &SourceString, english: &EnglishPack) -> Result<Self> {
        let target = norm_key(&source.name);
        let anchor = english
            .locate(&source.name, &source.text)?
            .map(|location| (norm_key(&location.key), location.file.clone()));
        let (base, digits) = key_base_and_num(&target);
        Ok(Self {
            target,
            anchor,
            base,
            digits,
        })
    }

    /// Translation template in `pack`. Tried in order: the string's own
    /// key, the English key in the same file, the English key in any file,
    /// then the numbered family of the string's key.
    pub fn template<'p>(&self, pack: &'p LanguagePack) -> Option<&'p str> {
        if let Some(value) = pack.by_key(&self.target) {
            return Some(value);
        }
        if let Some((key, file)) = &self.anchor {
            if let Some(value) = pack.in_file(file, key).or_else(|| pack.by_key(key)) {
                return Some(value);
            }
        }
        pack.family(&self.base, self.digits.as_deref())
    }
}

/// Translated entries per language, ready to write.
#[derive(Debug, Default)]
pub struct Translations {
    pub total: usize,
    /// Language code to `(name, escaped text)` in source order.
    pub languages: BTreeMap<String, Vec<(String, String)>>,
    /// Strings no language had a translation for, sorted by name.
    pub unmatched: Vec<SourceString>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateSummary {
    pub total: usize,
    pub matched: usize,
    pub per_language: BTreeMap<String, usize>,
}

impl TranslateSummary {
    pub fn unmatched(&self) -> usize {
        self.total - self.matched
    }
}

impl Translations {
    pub fn summary(&self) -> TranslateSummary {
        TranslateSummary {
            total: self.total,
            matched: self.total - self.unmatched.len(),
            per_language: self
                .languages
                .iter()
                .map(|(language, entries)| (language.clone(), entries.len()))
                .collect(),
        }
    }
}

/// Look every string up in each language. A string counts as matched when
/// at least one language translates it.
pub fn translate_strings<S: AsRef<str>>(
    sources: &[SourceString],
    english: &EnglishPack,
    packs: &TranslationPacks,
    languages: &[S],
) -> Result<Translations> {
    let mut translations = Translations {
        total: sources.len(),
        ..Translations::default()
    };
    for language in languages {
        translations
            .languages
            .entry(language.as_ref().to_string())
            .or_default();
    }

    for source in sources {
        let lookup = Lookup::new(source, english)?;
        let mut found = false;
        for (language, entries) in translations.languages.iter_mut() {
            let Some(template) = packs.get(language).and_then(|pack| lookup.template(pack)) else {
                continue;
            };
            let text = escape_translation(&fill_template(template, &source.inject)?);
            debug!("{} [{}]: {}", source.name, language, text);
            entries.push((source.name.clone(), text));
            found = true;
        }
        if !found {
            translations.unmatched.push(source.clone());
        }
    }
    translations.unmatched.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(translations)
}

/// Translate the `strings.xml` at `input` from the packs in `lang_dir`,
/// writing `values-<language>/strings.xml` per language and
/// `unmatched.xml` under `output`.
///
/// Every requested language gets a file, empty when nothing matched.
pub fn strings_translate<S: AsRef<str>>(
    input: &Path,
    lang_dir: &Path,
    output: &Path,
    languages: &[S],
) -> Result<TranslateSummary> {
    if !input.exists() {
        return Err(StringsError::InputNotFound(input.to_path_buf()));
    }
    let sources = parse_strings_xml(&fs::read_to_string(input)?)?;
    info!("Read {} string(s) from {:?}", sources.len(), input);

    let packs = TranslationPacks::load(lang_dir, languages)?;
    let english = EnglishPack::load(&lang_dir.join(ENGLISH))?;
    let translations = translate_strings(&sources, &english, &packs, languages)?;

    for (language, entries) in &translations.languages {
        let dir = output.join(format!("values-{language}"));
        fs::create_dir_all(&dir)?;
        let path = dir.join(STRINGS_FILE);
        let entries = entries.iter().map(|(name, text)| (name.as_str(), text.as_str()));
        fs::write(&path, write_resources(entries))?;
        debug!("Wrote {:?}", path);
    }

    fs::create_dir_all(output)?;
    let unmatched: Vec<(&str, String)> = translations
        .unmatched
        .iter()
        .map(|source| (source.name.as_str(), escape_text(&source.text)))
        .collect();
    let entries = unmatched.iter().map(|(name, text)| (*name, text.as_str()));
    fs::write(output.join(UNMATCHED_FILE), write_resources(entries))?;

    let summary = translations.summary();
    info!(
        "Matched {} of {} string(s), {} unmatched",
        summary.matched,
        summary.total,
        summary.unmatched()
    );
    Ok(summary)
}
