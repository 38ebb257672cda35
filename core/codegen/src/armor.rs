use crate::format::{
    boost, display_name, element, flag, price_args, resource_name, sorted_by_key, title_case,
    upgrades, value_or, yes_no,
};
use enml::{Entity, Value};

/// Weapon-family boosts in constructor order.
pub(crate) const WEAPON_BOOSTS: [&str; 6] = [
    "swordBoost",
    "staffBoost",
    "daggerBoost",
    "axeBoost",
    "hammerBoost",
    "spearBoost",
];

fn max_armor_key(entity: &Entity) -> f64 {
    entity
        .get_f64("maxLevelArmor")
        .or_else(|| entity.get_f64("armor"))
        .unwrap_or(0.0)
}

/// `armorList.add(new Armor(...));` lines, weakest first.
pub fn armor_code(entities: &[Entity]) -> Vec<String> {
    sorted_by_key(entities, max_armor_key)
        .into_iter()
        .map(armor_line)
        .collect()
}

fn armor_line(entity: &Entity) -> String {
    let name = resource_name(entity.get_str("name").unwrap_or("test_armor"));
    let min_armor = value_or(entity, "armor", Value::int(0));
    let max_armor = value_or(entity, "maxLevelArmor", min_armor.clone());
    let boosts: Vec<String> = ["speedBoost", "jumpBoost", "magicBoost"]
        .into_iter()
        .chain(WEAPON_BOOSTS)
        .map(|key| boost(entity, key).to_string())
        .collect();

    format!(
        "armorList.add(new Armor(str(context, R.string.{name}), Elements.{}, {}, {}, {}, {}, {}, R.drawable.armor_{name}, {}));",
        element(entity),
        flag(entity, "frost"),
        min_armor,
        max_armor,
        upgrades(entity),
        boosts.join(", "),
        price_args(entity),
    )
}

/// One `Armor: ...` summary line per item.
pub fn armor_summary(entities: &[Entity]) -> Vec<String> {
    sorted_by_key(entities, max_armor_key)
        .into_iter()
        .map(|entity| {
            let min_armor = value_or(entity, "armor", Value::int(0));
            let max_armor = value_or(entity, "maxLevelArmor", min_armor.clone());
            format!(
                "Armor: {}, Element: {}, Immune to Frost: {}, Min Armor: {}, Max Armor: {}, Upgrades: {}, Speed: {}%, Jump: {}%, Magic: {}%",
                display_name(entity),
                title_case(&element(entity)),
                yes_no(entity, "frost"),
                min_armor,
                max_armor,
                value_or(entity, "maxLevelAllowed", Value::int(1)),
                boost(entity, "speedBoost"),
                boost(entity, "jumpBoost"),
                boost(entity, "magicBoost"),
            )
        })
        .collect()
}
