use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// --- Values ---

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            // Whole floats keep their decimal point: 5.0, not 5
            Number::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Value {
    pub fn int(v: i64) -> Self {
        Value::Number(Number::Int(v))
    }

    pub fn float(v: f64) -> Self {
        Value::Number(Number::Float(v))
    }

    pub fn text(v: impl Into<String>) -> Self {
        Value::Text(v.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view. Text that parses as a number counts, so values written
    /// as strings by older data files still feed the formatters.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Bool(_) => None,
        }
    }

    /// False for `false`, zero and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64() != 0.0,
            Value::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::text(v)
    }
}

// --- Entities ---

/// One parsed block: field name to typed value.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Entity {
    fields: BTreeMap<String, Value>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Later writes win.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// First of `keys` holding a truthy value.
    pub fn first_truthy(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| v.is_truthy())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Entity {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entity = Entity::new();
        for (k, v) in iter {
            entity.insert(k, v);
        }
        entity
    }
}

/// Entities grouped by type tag ("armor", "sword", ...).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct EntityCollection {
    groups: BTreeMap<String, Vec<Entity>>,
}

impl EntityCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection with an empty list for every tag.
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: tags.into_iter().map(|t| (t.into(), Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, tag: &str, entity: Entity) {
        self.groups.entry(tag.to_string()).or_default().push(entity);
    }

    pub fn ensure_tag(&mut self, tag: &str) {
        self.groups.entry(tag.to_string()).or_default();
    }

    pub fn get(&self, tag: &str) -> &[Entity] {
        self.groups.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Entity])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Vec<Entity>)> {
        self.groups.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

// --- Raw blocks ---

/// Text between an opener line and its matching closing brace.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    /// Opener line, without the brace.
    pub identifier: String,
    /// 1-based line number of the opener.
    pub line: usize,
    pub lines: Vec<String>,
}

impl RawBlock {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

// --- Diagnostics ---

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub source: String,
    pub line: Option<usize>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.source, line, self.message),
            None => write!(f, "{}: {}", self.source, self.message),
        }
    }
}

/// Non-fatal problems found while parsing.
#[derive(Serialize, Debug, Clone, Default)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, source: &str, line: Option<usize>, message: impl Into<String>) {
        let entry = Diagnostic {
            source: source.to_string(),
            line,
            message: message.into(),
        };
        tracing::warn!("{}", entry);
        self.entries.push(entry);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}

/// Data that parsed, plus whatever was skipped along the way.
#[derive(Debug, Clone)]
pub struct Parsed<T> {
    pub data: T,
    pub diagnostics: Diagnostics,
}

impl<T> Parsed<T> {
    pub fn new(data: T, diagnostics: Diagnostics) -> Self {
        Self { data, diagnostics }
    }
}
