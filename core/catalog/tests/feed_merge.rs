use catalog::{CatalogError, filter_collection, merge_online_fields, parse_feed};
use enml::process::parse_source;
use enml::{Diagnostics, EntityCollection, Value};

const FEED: &str = r#"{
    "version": 3,
    "items": {
        "weapons": [
            {"type": "weapon", "secondaryType": "hammer", "name_en": "Iron", "name_pt": "Ferro", "maxLevelDamage": 40, "freemiumCoinPrice": 120},
            {"type": "weapon", "secondaryType": "hammer", "name_en": "Iron", "maxLevelDamage": 99}
        ],
        "armors": [
            {"type": "armor", "name": "Cota de Malha", "sprite": "chain_mail.png", "maxLevelArmor": 12}
        ]
    }
}"#;

fn local_items() -> EntityCollection {
    let text = "item iron_hammer\n{\n\tname = Iron Hammer;\n\tdamage = 10;\n}\n\
                item iron_hammer_b\n{\n\tname = Iron Hammer B;\n}\n";
    let armor_text = "item chain\n{\n\tname = Chain Mail;\n\tarmor = 3;\n}\n";

    let mut diagnostics = Diagnostics::new();
    let mut collection = EntityCollection::new();
    for entity in parse_source(text, "hammers.enml", &["item"], &mut diagnostics) {
        collection.push("hammer", entity);
    }
    for entity in parse_source(armor_text, "armors.enml", &["item"], &mut diagnostics) {
        collection.push("armor", entity);
    }
    assert!(diagnostics.is_empty());
    collection
}

#[test]
fn test_filter_then_merge() -> Result<(), CatalogError> {
    let records = parse_feed(FEED)?;
    assert_eq!(records.len(), 3);

    let mut collection = filter_collection(&local_items());
    assert_eq!(collection.get("hammer").len(), 1);

    let stats = merge_online_fields(&mut collection, &records);
    assert_eq!(stats.matched, 2);
    assert_eq!(stats.unmatched, 0);

    let hammer = &collection.get("hammer")[0];
    assert_eq!(hammer.get("maxLevelDamage"), Some(&Value::int(40)));
    assert_eq!(hammer.get("freemiumCoinPrice"), Some(&Value::int(120)));
    assert_eq!(hammer.get("damage"), Some(&Value::int(10)));

    // matched by sprite, since no localized name is close
    let armor = &collection.get("armor")[0];
    assert_eq!(armor.get("maxLevelArmor"), Some(&Value::int(12)));
    Ok(())
}

#[test]
fn test_feed_without_records() {
    assert!(matches!(parse_feed(r#"{"version": 3}"#), Err(CatalogError::EmptyFeed)));
    assert!(matches!(parse_feed("not json"), Err(CatalogError::Json(_))));
}
