//! Reader for the Android `strings.xml` holding the English texts.

use crate::error::{Result, StringsError};
use crate::template::inject_values;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// One `<string name="...">` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceString {
    pub name: String,
    pub text: String,
    /// Numbers and preserved tags to put back into a translation.
    pub inject: Vec<String>,
}

impl SourceString {
    pub fn new(name: impl Into<String>, text: &str) -> Result<Self> {
        let text = text.trim().replace("\\'", "'");
        let inject = inject_values(&text)?;
        Ok(Self {
            name: name.into(),
            text,
            inject,
        })
    }
}

/// `<string>` element being read. Only its leading text counts.
struct OpenString {
    name: String,
    text: String,
    depth: usize,
    leading: bool,
}

impl OpenString {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            depth: 0,
            leading: true,
        }
    }
}

fn xml_error(e: impl std::fmt::Display) -> StringsError {
    StringsError::Xml(e.to_string())
}

fn string_name(e: &BytesStart) -> Result<Option<String>> {
    let Some(attr) = e.try_get_attribute("name").map_err(xml_error)? else {
        return Ok(None);
    };
    let name = attr.unescape_value().map_err(xml_error)?;
    Ok(Some(name.into_owned()).filter(|n| !n.is_empty()))
}

/// Named strings of a resources document in document order. A name seen
/// twice keeps its first position and its last text.
pub fn parse_strings_xml(xml_str: &str) -> Result<Vec<SourceString>> {
    let mut reader = Reader::from_str(xml_str);
    reader.config_mut().trim_text(true);

    let mut strings: Vec<SourceString> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut push = |entry: SourceString| match positions.get(&entry.name) {
        Some(&index) => strings[index] = entry,
        None => {
            positions.insert(entry.name.clone(), strings.len());
            strings.push(entry);
        }
    };

    let mut current: Option<OpenString> = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match current.as_mut() {
                Some(open) => {
                    open.depth += 1;
                    open.leading = false;
                }
                None if e.name().as_ref() == b"string" => {
                    current = string_name(e)?.map(OpenString::new);
                }
                None => {}
            },
            Ok(Event::Empty(ref e)) => match current.as_mut() {
                Some(open) => open.leading = false,
                None if e.name().as_ref() == b"string" => {
                    if let Some(name) = string_name(e)? {
                        push(SourceString::new(name, "")?);
                    }
                }
                None => {}
            },
            Ok(Event::Text(ref e)) => {
                if let Some(open) = current.as_mut().filter(|o| o.depth == 0 && o.leading) {
                    open.text.push_str(&e.unescape().map_err(xml_error)?);
                }
            }
            Ok(Event::End(_)) => {
                if let Some(open) = current.as_mut() {
                    if open.depth > 0 {
                        open.depth -= 1;
                    } else if let Some(open) = current.take() {
                        push(SourceString::new(open.name, &open.text)?);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }
        buf.clear();
    }
    Ok(strings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRINGS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Dungeon Hero</string>
    <string name="gold_bonus">Gain 25 gold in &lt;new-game-plus&gt;</string>
    <string name="quote">Don\'t panic</string>
    <string name="styled">Hello <b>bold</b> world</string>
    <string name="empty"/>
    <string>No name</string>
    <string name="app_name">Dungeon Hero 2</string>
</resources>
"#;

    #[test]
    fn test_parse_strings_xml() -> Result<()> {
        let strings = parse_strings_xml(STRINGS_XML)?;
        let names: Vec<&str> = strings.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["app_name", "gold_bonus", "quote", "styled", "empty"]);

        assert_eq!(strings[0].text, "Dungeon Hero 2");
        assert_eq!(strings[0].inject, vec!["2"]);
        assert_eq!(strings[1].text, "Gain 25 gold in <new-game-plus>");
        assert_eq!(strings[1].inject, vec!["25", "<new-game-plus>"]);
        assert_eq!(strings[2].text, "Don't panic");
        assert_eq!(strings[3].text, "Hello");
        assert_eq!(strings[4].text, "");
        Ok(())
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let result = parse_strings_xml("<resources><string name=\"a\">x</other></resources>");
        assert!(matches!(result, Err(StringsError::Xml(_))));
    }
}
