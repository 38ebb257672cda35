//! Android resources output.

pub const RESOURCES_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n";
pub const RESOURCES_FOOTER: &str = "</resources>\n";

/// Escapes of a translated text. Preserved tags stay markup.
pub fn escape_translation(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('\'', "\\'")
        .replace('%', "\\%")
}

/// Escapes of an English text copied verbatim.
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "\\'")
}

fn escape_attribute(name: &str) -> String {
    name.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

/// Resources document of `(name, escaped text)` entries in the given order.
pub fn write_resources<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::from(RESOURCES_HEADER);
    for (name, text) in entries {
        out.push_str(&format!(
            "    <string name=\"{}\">{}</string>\n",
            escape_attribute(name),
            text
        ));
    }
    out.push_str(RESOURCES_FOOTER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes() {
        assert_eq!(escape_translation("R&D 50% l'or"), "R&amp;D 50\\% l\\'or");
        assert_eq!(
            escape_text("<b>Tom & Jerry's</b>"),
            "&lt;b&gt;Tom &amp; Jerry\\'s&lt;/b&gt;"
        );
    }

    #[test]
    fn test_write_resources() {
        let xml = write_resources([("title", "Titel"), ("a\"b", "x")]);
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n    \
             <string name=\"title\">Titel</string>\n    \
             <string name=\"a&quot;b\">x</string>\n</resources>\n"
        );
        let empty = write_resources(Vec::<(&str, &str)>::new());
        assert_eq!(empty, format!("{RESOURCES_HEADER}{RESOURCES_FOOTER}"));
    }
}
