//! Shared field conversions for the code and summary formatters.

use catalog::PRICE_FIELDS;
use enml::{Entity, Value};
use std::cmp::Ordering;

/// Stat multiplier as a percentage bonus: 1.25 -> 25. Exactly 0 or 1 means
/// "no bonus". Halves round to even.
pub fn boost_percent(multiplier: f64) -> i64 {
    if multiplier == 0.0 || multiplier == 1.0 {
        0
    } else {
        ((multiplier - 1.0) * 100.0).round_ties_even() as i64
    }
}

/// Boost field of `entity` as a percentage; a missing field is no bonus.
pub fn boost(entity: &Entity, key: &str) -> i64 {
    boost_percent(entity.get_f64(key).unwrap_or(1.0))
}

/// Android resource identifier for an item name.
pub fn resource_name(name: &str) -> String {
    name.replace(' ', "_")
        .replace('\'', "")
        .replace('+', "_plus")
        .replace('-', "")
        .to_lowercase()
}

/// `Elements.*` constant name; empty or missing means `NEUTRAL`.
pub fn element(entity: &Entity) -> String {
    let element = entity
        .get("element")
        .map(|v| v.to_string().to_uppercase())
        .unwrap_or_default();
    if element.is_empty() {
        "NEUTRAL".to_string()
    } else {
        element
    }
}

/// Upgrade count: `maxLevelAllowed`, or 1 when missing or zero.
pub fn upgrades(entity: &Entity) -> Value {
    entity
        .first_truthy(&["maxLevelAllowed"])
        .cloned()
        .unwrap_or(Value::int(1))
}

pub fn value_or(entity: &Entity, key: &str, default: Value) -> Value {
    entity.get(key).cloned().unwrap_or(default)
}

/// Java boolean literal for a flag field.
pub fn flag(entity: &Entity, key: &str) -> String {
    entity
        .get(key)
        .map(|v| v.to_string().to_lowercase())
        .unwrap_or_else(|| "false".to_string())
}

pub fn yes_no(entity: &Entity, key: &str) -> &'static str {
    if entity.get(key).is_some_and(Value::is_truthy) {
        "Yes"
    } else {
        "No"
    }
}

/// The six price arguments, in constructor order. Missing prices are 0.
pub fn price_args(entity: &Entity) -> String {
    PRICE_FIELDS
        .iter()
        .map(|key| value_or(entity, key, Value::int(0)).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Capitalize the first letter of every word, lowercase the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Display name for summaries: underscores read as spaces, title case.
pub fn display_name(entity: &Entity) -> String {
    title_case(&entity.get_str("name").unwrap_or("Unknown").replace('_', " "))
}

/// Stable ascending sort on a numeric key.
pub fn sorted_by_key<'a, F>(entities: &'a [Entity], key: F) -> Vec<&'a Entity>
where
    F: Fn(&Entity) -> f64,
{
    let mut sorted: Vec<&Entity> = entities.iter().collect();
    sorted.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
    sorted
}

/// Round to two decimals, halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
