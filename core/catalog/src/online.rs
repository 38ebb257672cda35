use crate::error::{CatalogError, Result};
use crate::kind::{ItemKind, WeaponKind};
use enml::{Entity, EntityCollection, Value};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use tracing::debug;

/// One item object from the online feed. Read-only.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct OnlineRecord {
    fields: Map<String, serde_json::Value>,
}

impl OnlineRecord {
    pub fn new(fields: Map<String, serde_json::Value>) -> Self {
        Self { fields }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(serde_json::Value::as_str)
    }

    /// Scalar field as an entity value; null and nested values are skipped.
    pub fn field(&self, key: &str) -> Option<Value> {
        self.fields.get(key).and_then(scalar_value)
    }

    /// `(key, text)` for every string field whose key starts with `name`.
    pub fn names(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(k, _)| k.starts_with("name"))
            .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
    }

    /// Sprite (or image) file name of the record.
    pub fn sprite(&self) -> Option<&str> {
        self.get_str("sprite").or_else(|| self.get_str("image"))
    }

    /// Scalar fields of the record as a local entity.
    pub fn to_entity(&self) -> Entity {
        self.fields
            .iter()
            .filter_map(|(k, v)| scalar_value(v).map(|v| (k.as_str(), v)))
            .collect()
    }
}

fn scalar_value(value: &serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::int(i)),
            None => n.as_f64().map(Value::float),
        },
        serde_json::Value::String(s) => Some(Value::text(s.as_str())),
        _ => None,
    }
}

fn is_record(object: &Map<String, serde_json::Value>) -> bool {
    object.contains_key("type") || object.keys().any(|k| k.starts_with("name"))
}

/// Every item object found in `document`, in document order.
///
/// The feed is usually a flat array, but wrapper objects and nested arrays
/// are walked too. Objects with a `type` key or a `name*` key are records;
/// other objects are searched through.
pub fn collect_records(document: &serde_json::Value) -> Vec<OnlineRecord> {
    let mut records = Vec::new();
    let mut stack = vec![document];

    while let Some(node) = stack.pop() {
        match node {
            serde_json::Value::Array(items) => stack.extend(items.iter().rev()),
            serde_json::Value::Object(object) if is_record(object) => {
                records.push(OnlineRecord::new(object.clone()));
            }
            serde_json::Value::Object(object) => stack.extend(object.values().rev()),
            _ => {}
        }
    }

    records
}

/// Parse feed text into records. A feed without records is an error.
pub fn parse_feed(text: &str) -> Result<Vec<OnlineRecord>> {
    let document: serde_json::Value = serde_json::from_str(text)?;
    let records = collect_records(&document);
    if records.is_empty() {
        return Err(CatalogError::EmptyFeed);
    }
    debug!("Collected {} online records", records.len());
    Ok(records)
}

/// Which local bucket an online record belongs to.
pub fn record_kind(record: &OnlineRecord) -> ItemKind {
    let item_type = record.get_str("type").unwrap_or("").trim().to_lowercase();
    let secondary = record.get_str("secondaryType").unwrap_or("");

    if item_type == "armor" || record.contains_key("maxLevelArmor") {
        ItemKind::Armor
    } else if item_type == "weapon" {
        ItemKind::Weapon(WeaponKind::from_secondary_type(secondary))
    } else {
        ItemKind::Ring
    }
}

/// Shape online records like locally parsed data, so the feed alone can
/// drive the formatters.
pub fn into_collection(records: &[OnlineRecord]) -> EntityCollection {
    let mut collection = EntityCollection::with_tags(ItemKind::STANDARD_TAGS);
    for record in records {
        collection.push(record_kind(record).tag(), record.to_entity());
    }

    let counts: Vec<String> = collection
        .iter()
        .map(|(tag, entities)| format!("{}: {}", tag, entities.len()))
        .collect();
    debug!("Converted online data into local structure: {}", counts.join(", "));
    collection
}
