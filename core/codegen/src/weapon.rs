use crate::format::{
    boost, display_name, element, flag, price_args, resource_name, sorted_by_key, title_case,
    upgrades, value_or, yes_no,
};
use catalog::WeaponKind;
use enml::{Entity, Value};

/// Per-kind names used in generated code.
pub struct WeaponStyle {
    pub enum_name: &'static str,
    pub list_name: &'static str,
    pub drawable_prefix: &'static str,
    pub default_name: &'static str,
}

pub fn style(kind: WeaponKind) -> WeaponStyle {
    match kind {
        WeaponKind::Sword => WeaponStyle {
            enum_name: "SWORD",
            list_name: "swordList",
            drawable_prefix: "sword",
            default_name: "test_sword",
        },
        WeaponKind::Hammer => WeaponStyle {
            enum_name: "HAMMER",
            list_name: "hammerList",
            drawable_prefix: "hammer",
            default_name: "test_hammer",
        },
        WeaponKind::Spear => WeaponStyle {
            enum_name: "SPEAR",
            list_name: "spearList",
            drawable_prefix: "spear",
            default_name: "test_spear",
        },
        WeaponKind::Staff => WeaponStyle {
            enum_name: "STAFF",
            list_name: "staffList",
            drawable_prefix: "staff",
            default_name: "test_staff",
        },
        WeaponKind::Dagger => WeaponStyle {
            enum_name: "DAGGER",
            list_name: "daggerList",
            drawable_prefix: "dagger",
            default_name: "test_dagger",
        },
        WeaponKind::Axe => WeaponStyle {
            enum_name: "AXE",
            list_name: "axeList",
            drawable_prefix: "axe",
            default_name: "test_axe",
        },
    }
}

/// Damage at max level. Older files spell the field differently; a zero
/// falls through to the next spelling and finally to base `damage`.
pub fn max_damage(entity: &Entity) -> Value {
    entity
        .first_truthy(&["maxLevelDamage", "maxleveldamage", "max_damage"])
        .cloned()
        .unwrap_or_else(|| value_or(entity, "damage", Value::int(0)))
}

fn max_damage_key(entity: &Entity) -> f64 {
    max_damage(entity).as_f64().unwrap_or(0.0)
}

/// `<kind>List.add(new Weapon(...));` lines, ordered by max damage.
pub fn weapon_code(entities: &[Entity], kind: WeaponKind) -> Vec<String> {
    let style = style(kind);
    sorted_by_key(entities, max_damage_key)
        .into_iter()
        .map(|entity| {
            let name = resource_name(entity.get_str("name").unwrap_or(style.default_name));
            format!(
                "{}.add(new Weapon(str(context, R.string.{name}), WeaponTypes.{}, Elements.{}, {}, {}, {}, {}, {}, {}, R.drawable.{}_{name}, {}, {}, {}, {}, {}, {}, {}));",
                style.list_name,
                style.enum_name,
                element(entity),
                value_or(entity, "damage", Value::int(0)),
                max_damage(entity),
                upgrades(entity),
                boost(entity, "armorBoost"),
                boost(entity, "speedBoost"),
                boost(entity, "jumpBoost"),
                style.drawable_prefix,
                value_or(entity, "attackCooldown", Value::int(0)),
                value_or(entity, "pierceCount", Value::int(0)),
                flag(entity, "enablePierceAreaDamage"),
                flag(entity, "persistAgainstProjectile"),
                flag(entity, "poisonous"),
                flag(entity, "frost"),
                price_args(entity),
            )
        })
        .collect()
}

/// One `Weapon: ...` summary line per weapon.
pub fn weapon_summary(entities: &[Entity], kind: WeaponKind) -> Vec<String> {
    sorted_by_key(entities, max_damage_key)
        .into_iter()
        .map(|entity| {
            let weapon_type = entity.get_str("weapon_type").unwrap_or(kind.tag());
            format!(
                "Weapon: {}, Type: {}, Element: {}, Min Damage: {}, Max Damage: {}, Upgrades: {}, Armor Bonus: {}%, Speed: {}%, Jump: {}%, Attack Cooldown: {}, Pierce Count: {}, Pierce: {}, Persist: {}, Poisonous: {}, Frost: {}",
                display_name(entity),
                title_case(weapon_type),
                title_case(&element(entity)),
                value_or(entity, "damage", Value::int(0)),
                value_or(entity, "maxLevelDamage", value_or(entity, "damage", Value::int(0))),
                value_or(entity, "maxLevelAllowed", Value::int(1)),
                boost(entity, "armorBoost"),
                boost(entity, "speedBoost"),
                boost(entity, "jumpBoost"),
                value_or(entity, "attackCooldown", Value::int(0)),
                value_or(entity, "pierceCount", Value::int(0)),
                yes_no(entity, "enablePierceAreaDamage"),
                yes_no(entity, "persistAgainstProjectile"),
                yes_no(entity, "poisonous"),
                yes_no(entity, "frost"),
            )
        })
        .collect()
}
