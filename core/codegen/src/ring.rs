use crate::armor::WEAPON_BOOSTS;
use crate::format::{
    boost, display_name, element, price_args, resource_name, sorted_by_key, title_case, value_or,
};
use enml::{Entity, Value};

fn armor_key(entity: &Entity) -> f64 {
    entity.get_f64("armor").unwrap_or(0.0)
}

/// `ringList.add(new Ring(...));` lines, ordered by armor.
pub fn ring_code(entities: &[Entity]) -> Vec<String> {
    sorted_by_key(entities, armor_key)
        .into_iter()
        .map(|entity| {
            let name = resource_name(entity.get_str("name").unwrap_or("test_ring"));
            let boosts: Vec<String> = ["armorBoost", "speedBoost", "jumpBoost", "magicBoost"]
                .into_iter()
                .chain(WEAPON_BOOSTS)
                .map(|key| boost(entity, key).to_string())
                .collect();
            format!(
                "ringList.add(new Ring(str(context, R.string.{name}), Elements.{}, {}, {}, R.drawable.ring_{name}, {}));",
                element(entity),
                value_or(entity, "armor", Value::int(0)),
                boosts.join(", "),
                price_args(entity),
            )
        })
        .collect()
}

/// One `Ring: ...` summary line per ring.
pub fn ring_summary(entities: &[Entity]) -> Vec<String> {
    sorted_by_key(entities, armor_key)
        .into_iter()
        .map(|entity| {
            format!(
                "Ring: {}, Element: {}, Armor: {}, Armor Bonus: {}%, Speed: {}%, Jump: {}%, Magic: {}%",
                display_name(entity),
                title_case(&element(entity)),
                value_or(entity, "armor", Value::int(0)),
                boost(entity, "armorBoost"),
                boost(entity, "speedBoost"),
                boost(entity, "jumpBoost"),
                boost(entity, "magicBoost"),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_line() {
        let ring: Entity = [
            ("name", Value::text("Gold Ring")),
            ("armor", Value::int(1)),
            ("magicBoost", Value::float(1.5)),
            ("baseFreemiumSellPrice", Value::int(7)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            ring_code(&[ring.clone()]),
            vec![
                "ringList.add(new Ring(str(context, R.string.gold_ring), Elements.NEUTRAL, 1, 0, 0, 0, 50, 0, 0, 0, 0, 0, 0, R.drawable.ring_gold_ring, 0, 0, 0, 0, 7, 0));"
            ]
        );
        assert_eq!(
            ring_summary(&[ring]),
            vec![
                "Ring: Gold Ring, Element: Neutral, Armor: 1, Armor Bonus: 0%, Speed: 0%, Jump: 0%, Magic: 50%"
            ]
        );
    }
}
