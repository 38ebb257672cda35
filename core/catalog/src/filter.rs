use crate::kind::ItemKind;
use enml::{Entity, EntityCollection};
use tracing::debug;

/// `secondaryType` values that are never equipment.
pub const EXCLUDED_SECONDARY_TYPES: [&str; 4] = ["essence", "rune", "key", "arcane-rune"];

/// Why `entity` (filed under `tag`) should be left out, if it should.
pub fn exclusion_reason(tag: &str, entity: &Entity) -> Option<String> {
    let name = entity.name().unwrap_or("").trim();
    if name.to_lowercase().ends_with(" b") {
        return Some(format!("name '{name}' ends with ' B'"));
    }

    let secondary = entity.get_str("secondaryType").unwrap_or("").trim().to_lowercase();
    if EXCLUDED_SECONDARY_TYPES.contains(&secondary.as_str()) {
        return Some(format!("secondaryType is '{secondary}'"));
    }

    let sprite = entity.get_str("sprite").unwrap_or("").trim().to_lowercase();
    if let Some(kind) = ItemKind::from_tag(tag) {
        if kind.placeholder_sprites().contains(&sprite.as_str()) {
            return Some(format!("placeholder sprite '{sprite}'"));
        }
    }

    None
}

/// Copy of `collection` without variant, non-equipment and placeholder
/// entries. Tags are kept even when all of their entities go.
pub fn filter_collection(collection: &EntityCollection) -> EntityCollection {
    let mut filtered = EntityCollection::new();
    for (tag, entities) in collection.iter() {
        filtered.ensure_tag(tag);
        for entity in entities {
            if let Some(reason) = exclusion_reason(tag, entity) {
                debug!(
                    "Excluding {} '{}': {}",
                    tag,
                    entity.name().unwrap_or(""),
                    reason
                );
                continue;
            }
            filtered.push(tag, entity.clone());
        }
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use enml::Value;

    fn entity(pairs: &[(&str, &str)]) -> Entity {
        pairs.iter().map(|(k, v)| (*k, Value::text(*v))).collect()
    }

    fn names<'a>(collection: &'a EntityCollection, tag: &str) -> Vec<&'a str> {
        collection.get(tag).iter().filter_map(|e| e.name()).collect()
    }

    fn sample() -> EntityCollection {
        let mut collection = EntityCollection::new();
        collection.push(
            "armor",
            entity(&[("name", "Leather Vest"), ("sprite", "armor_leather.png")]),
        );
        collection.push("armor", entity(&[("name", "Leather Vest B")]));
        collection.push("armor", entity(&[("name", "Test Armor"), ("sprite", "Armor_Dummy.png")]));
        collection.push("ring", entity(&[("name", "Fire Rune"), ("secondaryType", "Rune")]));
        collection.push(
            "ring",
            entity(&[("name", "Mystery"), ("sprite", "question_mark_entity.png")]),
        );
        collection.push("ring", entity(&[("name", "Gold Ring"), ("sprite", "armor_dummy.png")]));
        collection.push("sword", entity(&[("name", "Blade"), ("sprite", "sword_dummy.png")]));
        collection.push("sword", entity(&[("name", "Club")]));
        collection
    }

    #[test]
    fn test_filter_rules() {
        let filtered = filter_collection(&sample());
        assert_eq!(names(&filtered, "armor"), vec!["Leather Vest"]);
        // armor placeholder does not apply to rings
        assert_eq!(names(&filtered, "ring"), vec!["Gold Ring"]);
        assert_eq!(names(&filtered, "sword"), vec!["Club"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let once = filter_collection(&sample());
        let twice = filter_collection(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_untouched_and_tags_kept() {
        let mut collection = EntityCollection::new();
        collection.push("axe", entity(&[("name", "Axe B")]));
        let filtered = filter_collection(&collection);
        assert_eq!(collection.get("axe").len(), 1);
        assert!(filtered.get("axe").is_empty());
        assert_eq!(filtered.tags().collect::<Vec<_>>(), vec!["axe"]);
    }

    #[test]
    fn test_unknown_tag_skips_sprite_rule() {
        let e = entity(&[("name", "Odd"), ("sprite", "sword_dummy.png")]);
        assert_eq!(exclusion_reason("essence", &e), None);
        assert!(exclusion_reason("dagger", &e).is_some());
    }
}
