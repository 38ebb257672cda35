use crate::reader::coerce_value;
use crate::types::{Entity, Value};

// --- Writing Logic (Entity -> ENML text) ---

/// Write one entity as an ENML block under `identifier`.
///
/// Text that would be read back as something else (`"true"`, `"12"`,
/// anything with a `;`) is quoted.
pub fn write_block(identifier: &str, entity: &Entity) -> String {
    let mut output = String::new();
    output.push_str(identifier);
    output.push('\n');
    output.push_str("{\n");
    for (key, value) in entity.iter() {
        output.push_str(&format!("\t{} = {};\n", key, render_value(value)));
    }
    output.push_str("}\n");
    output
}

/// Write a list of entities, one block each, separated by a blank line.
pub fn write_blocks<'a, I>(keyword: &str, entities: I) -> String
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut output = String::new();
    for (index, entity) in entities.into_iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        let identifier = match entity.name().map(block_name).filter(|n| !n.is_empty()) {
            Some(name) => format!("{keyword} {name}"),
            None => format!("{keyword} {index}"),
        };
        output.push_str(&write_block(&identifier, entity));
    }
    output
}

/// Block identifier for an item name: `[a-z0-9_]` only, so nothing in it
/// can open, close or comment out the block.
fn block_name(name: &str) -> String {
    let mapped: String = name
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' => Some(c),
            '_' | '-' => Some('_'),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    mapped
        .split('_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Text(s) => {
            let needs_quotes = s.is_empty()
                || s.contains(';')
                || s.contains("//")
                || s.contains('{')
                || s.contains('}')
                || s.trim() != s
                || coerce_value(s) != *value;
            if needs_quotes {
                format!("\"{s}\"")
            } else {
                s.clone()
            }
        }
        other => other.to_string(),
    }
}
