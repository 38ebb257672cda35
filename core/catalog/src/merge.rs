use crate::kind::{ItemKind, PRICE_FIELDS};
use crate::online::OnlineRecord;
use enml::{Entity, EntityCollection};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Comparison key for item names: lowercase ASCII letters, digits and
/// single spaces. Accents are folded onto their base letter.
pub fn normalize_name(input: &str) -> String {
    let folded: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    let mut kept = String::with_capacity(folded.len());
    for c in folded.chars() {
        if c.is_whitespace() {
            kept.push(' ');
        } else if let Some(ascii) = fold_letter(c) {
            kept.push_str(ascii);
        } else if c.is_ascii_lowercase() || c.is_ascii_digit() {
            kept.push(c);
        }
    }
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// ASCII spelling of lowercase letters that have no decomposition.
fn fold_letter(c: char) -> Option<&'static str> {
    match c {
        'ø' => Some("o"),
        'æ' => Some("ae"),
        'œ' => Some("oe"),
        'ß' => Some("ss"),
        'đ' | 'ð' => Some("d"),
        'ł' => Some("l"),
        'þ' => Some("th"),
        'ı' => Some("i"),
        _ => None,
    }
}

/// Name key derived from a sprite file name (`iron_sword.png` -> `iron sword`).
fn sprite_key(sprite: &str) -> String {
    let stem = match sprite.rfind('.') {
        Some(pos) if pos > 0 => &sprite[..pos],
        _ => sprite,
    };
    normalize_name(&stem.replace(['_', '-'], " "))
}

/// `normalized` without a trailing word equal to the type tag.
fn strip_type_suffix(normalized: &str, tag: &str) -> Option<String> {
    let (head, last) = normalized.rsplit_once(' ')?;
    if last == normalize_name(tag) {
        Some(head.to_string())
    } else {
        None
    }
}

fn drop_last_word(normalized: &str) -> Option<&str> {
    normalized.rsplit_once(' ').map(|(head, _)| head)
}

/// Lookup over online records by normalized name.
///
/// Localized names (`name`, `name_en`, `name_pt`, ...) are preferred; the
/// sprite file name is only consulted when no name matches. On key
/// collisions the earlier record wins.
pub struct OnlineIndex<'a> {
    records: &'a [OnlineRecord],
    by_name: HashMap<String, usize>,
    by_sprite: HashMap<String, usize>,
}

impl<'a> OnlineIndex<'a> {
    pub fn build(records: &'a [OnlineRecord]) -> Self {
        let mut by_name = HashMap::new();
        let mut by_sprite = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            for (_, name) in record.names() {
                let key = normalize_name(name);
                if !key.is_empty() {
                    by_name.entry(key).or_insert(idx);
                }
            }
            if let Some(sprite) = record.sprite() {
                let key = sprite_key(sprite);
                if !key.is_empty() {
                    by_sprite.entry(key).or_insert(idx);
                }
            }
        }
        debug!(
            "Indexed {} online records ({} names, {} sprites)",
            records.len(),
            by_name.len(),
            by_sprite.len()
        );
        Self {
            records,
            by_name,
            by_sprite,
        }
    }

    fn lookup(&self, candidates: &[String]) -> Option<&'a OnlineRecord> {
        let records = self.records;
        [&self.by_name, &self.by_sprite].into_iter().find_map(|map| {
            candidates
                .iter()
                .find_map(|c| map.get(c))
                .map(|&idx| &records[idx])
        })
    }

    /// Best record for a local item `name` filed under `tag`.
    pub fn find(&self, name: &str, tag: &str) -> Option<&'a OnlineRecord> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }

        let variants = |base: &str| -> Vec<String> {
            let mut out = vec![base.to_string()];
            out.extend(strip_type_suffix(base, tag));
            out
        };

        if let Some(record) = self.lookup(&variants(&normalized)) {
            return Some(record);
        }
        let shorter = drop_last_word(&normalized)?;
        self.lookup(&variants(shorter))
    }
}

/// Fields the merge owns for items of `kind`.
pub fn merged_fields(kind: Option<ItemKind>) -> Vec<&'static str> {
    let mut fields: Vec<&'static str> =
        kind.and_then(ItemKind::max_level_field).into_iter().collect();
    fields.extend(PRICE_FIELDS);
    fields
}

/// Copy the owned fields present in `record` into `entity`. Returns how many
/// fields were written.
pub fn merge_entity(entity: &mut Entity, kind: Option<ItemKind>, record: &OnlineRecord) -> usize {
    let mut copied = 0;
    for key in merged_fields(kind) {
        if let Some(value) = record.field(key) {
            entity.insert(key, value);
            copied += 1;
        }
    }
    copied
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub matched: usize,
    pub unmatched: usize,
    pub fields_copied: usize,
}

/// Backfill max-level stats and prices of local items from the online feed.
pub fn merge_online_fields(local: &mut EntityCollection, records: &[OnlineRecord]) -> MergeStats {
    let index = OnlineIndex::build(records);
    let mut stats = MergeStats::default();

    for (tag, entities) in local.iter_mut() {
        let kind = ItemKind::from_tag(tag);
        for entity in entities.iter_mut() {
            let name = entity.name().unwrap_or("").to_string();
            match index.find(&name, tag) {
                Some(record) => {
                    let copied = merge_entity(entity, kind, record);
                    debug!("Merged {} field(s) into {} '{}'", copied, tag, name);
                    stats.matched += 1;
                    stats.fields_copied += copied;
                }
                None => {
                    debug!("Local {} '{}' not found online", tag, name);
                    stats.unmatched += 1;
                }
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use enml::Value;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<OnlineRecord> {
        serde_json::from_value(value).unwrap()
    }

    fn named(name: &str) -> Entity {
        [("name", name)].into_iter().collect()
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Épée"), normalize_name("epee"));
        assert_eq!(normalize_name("  Dragon's   Tooth+1 "), "dragons tooth1");
        assert_eq!(normalize_name("Iron\tHammer"), "iron hammer");
        assert_eq!(normalize_name("¡¿!"), "");
    }

    #[test]
    fn test_normalize_name_folds_undecomposed_letters() {
        assert_eq!(normalize_name("Ørn"), "orn");
        assert_eq!(normalize_name("Æther Œil"), "aether oeil");
        assert_eq!(normalize_name("Straße"), "strasse");
        assert_eq!(normalize_name("Łuk Þorn"), "luk thorn");
    }

    #[test]
    fn test_suffix_stripped_match() {
        let online = records(json!([{ "name_en": "Iron", "maxLevelDamage": 40 }]));
        let mut local = EntityCollection::new();
        local.push("hammer", named("Iron Hammer"));

        let stats = merge_online_fields(&mut local, &online);

        let hammer = &local.get("hammer")[0];
        assert_eq!(hammer.name(), Some("Iron Hammer"));
        assert_eq!(hammer.get("maxLevelDamage"), Some(&Value::int(40)));
        assert_eq!(stats, MergeStats { matched: 1, unmatched: 0, fields_copied: 1 });
    }

    #[test]
    fn test_accent_insensitive_and_localized_names() {
        let online = records(json!([
            { "name": "Rapier", "name_fr": "Épée Royale", "maxLevelDamage": 55, "freemiumGoldPrice": 300 }
        ]));
        let mut local = EntityCollection::new();
        local.push("sword", named("epee royale"));
        merge_online_fields(&mut local, &online);

        let sword = &local.get("sword")[0];
        assert_eq!(sword.get("maxLevelDamage"), Some(&Value::int(55)));
        assert_eq!(sword.get("freemiumGoldPrice"), Some(&Value::int(300)));
    }

    #[test]
    fn test_drop_last_word_retry() {
        let online = records(json!([{ "name": "Frost Plate", "maxLevelArmor": 80 }]));
        let mut local = EntityCollection::new();
        local.push("armor", named("Frost Plate Reinforced"));
        merge_online_fields(&mut local, &online);
        assert_eq!(local.get("armor")[0].get("maxLevelArmor"), Some(&Value::int(80)));
    }

    #[test]
    fn test_sprite_is_last_resort() {
        let online = records(json!([
            { "name": "Something Else", "sprite": "iron_sword.png", "maxLevelDamage": 1 },
            { "name": "Iron Sword", "maxLevelDamage": 2 }
        ]));
        let index = OnlineIndex::build(&online);
        let found = index.find("Iron Sword", "sword").unwrap();
        assert_eq!(found.get_str("name"), Some("Iron Sword"));

        let found = index.find("Iron-Sword", "ring");
        assert!(found.is_none());

        let only_sprite = records(json!([{ "name": "X", "sprite": "moon_blade.png" }]));
        let index = OnlineIndex::build(&only_sprite);
        assert!(index.find("Moon Blade", "sword").is_some());
    }

    #[test]
    fn test_owned_fields_only() {
        let online = records(json!([{
            "name": "Plate",
            "armor": 999,
            "maxLevelArmor": 50,
            "maxLevelDamage": 70,
            "premiumCoinPrice": 5,
            "basePremiumSellPrice": null
        }]));
        let mut local = EntityCollection::new();
        let mut plate = named("Plate");
        plate.insert("armor", 10i64);
        plate.insert("basePremiumSellPrice", 3i64);
        local.push("armor", plate);
        local.push("ring", named("Plate"));

        let stats = merge_online_fields(&mut local, &online);
        assert_eq!(stats.matched, 2);

        let armor = &local.get("armor")[0];
        assert_eq!(armor.get("armor"), Some(&Value::int(10)));
        assert_eq!(armor.get("maxLevelArmor"), Some(&Value::int(50)));
        assert_eq!(armor.get("premiumCoinPrice"), Some(&Value::int(5)));
        assert_eq!(armor.get("basePremiumSellPrice"), Some(&Value::int(3)));
        assert!(!armor.contains_key("maxLevelDamage"));

        let ring = &local.get("ring")[0];
        assert!(!ring.contains_key("maxLevelArmor"));
        assert_eq!(ring.get("premiumCoinPrice"), Some(&Value::int(5)));
    }

    #[test]
    fn test_unmatched_left_alone() {
        let online = records(json!([{ "name": "Other", "maxLevelArmor": 1 }]));
        let mut local = EntityCollection::new();
        local.push("armor", named("Cloth"));
        local.push("armor", Entity::new());
        let before = local.clone();

        let stats = merge_online_fields(&mut local, &online);
        assert_eq!(stats.unmatched, 2);
        assert_eq!(local, before);
    }
}
