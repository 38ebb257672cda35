use crate::armor::{armor_code, armor_summary};
use crate::ring::{ring_code, ring_summary};
use crate::weapon::{weapon_code, weapon_summary};
use catalog::ItemKind;
use enml::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Java constructor calls.
    #[default]
    Code,
    /// Readable one-line summaries.
    Human,
}

impl OutputFormat {
    /// File name for the output of one type tag.
    pub fn file_name(self, tag: &str) -> String {
        match self {
            OutputFormat::Code => format!("{tag}_code.txt"),
            OutputFormat::Human => format!("{tag}_summary.txt"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Code => f.write_str("code"),
            OutputFormat::Human => f.write_str("human"),
        }
    }
}

/// Format the entities of one type tag. Unknown tags yield `None`.
pub fn render_items(tag: &str, entities: &[Entity], format: OutputFormat) -> Option<Vec<String>> {
    let kind = ItemKind::from_tag(tag)?;
    let lines = match (kind, format) {
        (ItemKind::Armor, OutputFormat::Code) => armor_code(entities),
        (ItemKind::Armor, OutputFormat::Human) => armor_summary(entities),
        (ItemKind::Ring, OutputFormat::Code) => ring_code(entities),
        (ItemKind::Ring, OutputFormat::Human) => ring_summary(entities),
        (ItemKind::Weapon(weapon), OutputFormat::Code) => weapon_code(entities, weapon),
        (ItemKind::Weapon(weapon), OutputFormat::Human) => weapon_summary(entities, weapon),
    };
    Some(lines)
}
