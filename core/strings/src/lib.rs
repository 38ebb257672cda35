//! Reuse of the game's existing translations for an Android `strings.xml`.
//!
//! Every English string is matched against the `.strings` language packs,
//! by key first and by text second, and written out once per language.

pub mod error;
pub mod key;
pub mod pack;
pub mod process;
pub mod source;
pub mod template;
pub mod writer;

pub use error::{Result, StringsError};
pub use key::{key_base_and_num, norm_key};
pub use pack::{EnglishPack, LanguagePack, PackLocation, TranslationPacks, parse_pack_line};
pub use process::{Lookup, TranslateSummary, Translations, strings_translate, translate_strings};
pub use source::{SourceString, parse_strings_xml};

/// Language codes filled in when none are requested.
pub const TARGET_LANGUAGES: &[&str] = &["de", "es", "fr", "it", "pt", "ru", "tr", "uk", "ja"];

/// Folder of the English pack inside the language directory.
pub const ENGLISH: &str = "en";

/// Tags that survive into the output and count as placeholders when matching.
pub const PRESERVED_TAGS: &[&str] = &["new-game-plus"];
