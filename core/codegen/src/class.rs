use crate::error::Result;
use crate::format::title_case;
use enml::process::parse_file;
use enml::{Entity, Parsed};
use std::path::Path;
use tracing::debug;

/// Openers of character class blocks (headgear that grants the class).
pub const CLASS_KEYWORDS: [&str; 3] = ["helmet", "hood", "hat"];

/// Read every class block of `path`.
pub fn parse_classes(path: &Path) -> Result<Parsed<Vec<Entity>>> {
    let parsed = parse_file(path, &CLASS_KEYWORDS)?;
    debug!("Total class blocks parsed: {}", parsed.data.len());
    Ok(parsed)
}

fn class_name(entity: &Entity) -> Option<String> {
    let class = entity.get("class")?.to_string().trim().to_lowercase();
    if class.is_empty() { None } else { Some(class) }
}

/// Bonus percentage of a multiplier field, with float noise removed so that
/// 1.2 floors to 20 rather than 19.
fn percent(entity: &Entity, key: &str) -> f64 {
    let raw = (entity.get_f64(key).unwrap_or(1.0) - 1.0) * 100.0;
    (raw * 1e6).round() / 1e6
}

/// The ten `CharacterClass` bonus arguments, floored.
pub fn class_parameters(entity: &Entity) -> [i64; 10] {
    let calc = |key: &str| percent(entity, key).floor() as i64;
    [
        0,
        0,
        calc("swordBoost"),
        calc("daggerBoost"),
        calc("hammerBoost"),
        calc("axeBoost"),
        0,
        0,
        calc("speedBoost"),
        calc("jumpBoost"),
    ]
}

/// `classList.add(new CharacterClass(...));` lines; blocks without a
/// `class` field are skipped.
pub fn class_code(entities: &[Entity]) -> Vec<String> {
    entities
        .iter()
        .filter_map(|entity| {
            let Some(class) = class_name(entity) else {
                debug!("Class block without a 'class' field: {:?}", entity.name());
                return None;
            };
            let params: Vec<String> = class_parameters(entity)
                .iter()
                .map(i64::to_string)
                .collect();
            let ident = class.replace('-', "_");
            Some(format!(
                "classList.add(new CharacterClass(ClassNames.{}, {}, R.drawable.class_{ident}));",
                ident.to_uppercase(),
                params.join(", "),
            ))
        })
        .collect()
}

/// One `Class: ...` summary line per class, bonuses truncated.
pub fn class_summary(entities: &[Entity]) -> Vec<String> {
    const BONUSES: [(&str, &str); 10] = [
        ("Armor Bonus", "armorBoost"),
        ("Magic Bonus", "magicBoost"),
        ("Sword Bonus", "swordBoost"),
        ("Dagger Bonus", "daggerBoost"),
        ("Hammer Bonus", "hammerBoost"),
        ("Axe Bonus", "axeBoost"),
        ("Spear Bonus", "spearBoost"),
        ("Staff Bonus", "staffBoost"),
        ("Speed Bonus", "speedBoost"),
        ("Jump Impulse Bonus", "jumpBoost"),
    ];

    entities
        .iter()
        .filter_map(|entity| {
            let class = class_name(entity)?;
            let bonuses: Vec<String> = BONUSES
                .iter()
                .map(|(label, key)| {
                    format!("{label}: {}%", percent(entity, key).trunc() as i64)
                })
                .collect();
            Some(format!("Class: {}, {}", title_case(&class), bonuses.join(", ")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use enml::Value;

    fn knight() -> Entity {
        [
            ("class", Value::text("Dark-Knight")),
            ("swordBoost", Value::float(1.2)),
            ("speedBoost", Value::float(0.95)),
            ("magicBoost", Value::text("1.5")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_class_parameters() {
        assert_eq!(class_parameters(&knight()), [0, 0, 20, 0, 0, 0, 0, 0, -5, 0]);
    }

    #[test]
    fn test_floor_and_trunc_differ_below_one() {
        let slow: Entity = [("class", Value::text("scout")), ("jumpBoost", Value::float(0.955))]
            .into_iter()
            .collect();
        assert_eq!(class_parameters(&slow)[9], -5);
        assert!(class_summary(&[slow])[0].ends_with("Jump Impulse Bonus: -4%"));
    }

    #[test]
    fn test_class_code() {
        let plain: Entity = [("name", "Plain Hat")].into_iter().collect();
        assert_eq!(
            class_code(&[knight(), plain]),
            vec![
                "classList.add(new CharacterClass(ClassNames.DARK_KNIGHT, 0, 0, 20, 0, 0, 0, 0, 0, -5, 0, R.drawable.class_dark_knight));"
            ]
        );
    }

    #[test]
    fn test_class_summary() {
        assert_eq!(
            class_summary(&[knight()]),
            vec![
                "Class: Dark-Knight, Armor Bonus: 0%, Magic Bonus: 50%, Sword Bonus: 20%, Dagger Bonus: 0%, Hammer Bonus: 0%, Axe Bonus: 0%, Spear Bonus: 0%, Staff Bonus: 0%, Speed Bonus: -5%, Jump Impulse Bonus: 0%"
            ]
        );
    }
}
