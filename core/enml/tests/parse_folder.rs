use enml::process::{enml_encode, parse_file, parse_folder};
use enml::{EnmlError, Entity, Value};
use std::collections::BTreeMap;
use std::fs;

fn file_map() -> BTreeMap<String, String> {
    [
        ("armors.enml", "armor"),
        ("heavy_armors.enml", "armor"),
        ("rings.enml", "ring"),
    ]
    .into_iter()
    .map(|(f, t)| (f.to_string(), t.to_string()))
    .collect()
}

#[test]
fn test_two_files_with_stray_block() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();

    fs::write(
        root.join("armors.enml"),
        "// leather\nitem leather\n{\n\tname = Leather Vest;\n\tarmor = 2;\n\tspeedBoost = 1.25;\n}\n",
    )?;
    fs::write(
        root.join("heavy_armors.enml"),
        "item plate\n{\n\tname = Plate;\n\tarmor = 9;\n\tfrost = true;\n}\n\nitem broken\n{\n\tname = Broken;\n",
    )?;
    fs::write(root.join("notes.txt"), "item ignored { name = Nope; }")?;
    fs::write(root.join("unmapped.enml"), "item ignored { name = Nope; }")?;

    let parsed = parse_folder(root, &file_map(), &["item"])?;

    let armor = parsed.data.get("armor");
    assert_eq!(armor.len(), 2);
    assert_eq!(armor[0].name(), Some("Leather Vest"));
    assert_eq!(armor[0].get("speedBoost"), Some(&Value::float(1.25)));
    assert_eq!(armor[1].get("frost"), Some(&Value::Bool(true)));

    // Mapped but absent files still get their bucket
    assert!(parsed.data.tags().any(|t| t == "ring"));
    assert!(parsed.data.get("ring").is_empty());

    assert_eq!(parsed.diagnostics.len(), 1);
    let warning = parsed.diagnostics.iter().next().unwrap();
    assert_eq!(warning.source, "heavy_armors.enml");
    assert_eq!(warning.line, Some(8));
    assert!(warning.message.contains("item broken"));
    Ok(())
}

#[test]
fn test_missing_folder_is_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("nope");
    match parse_folder(&missing, &file_map(), &["item"]) {
        Err(EnmlError::InputNotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected InputNotFound, got {:?}", other.map(|p| p.data)),
    }
}

#[test]
fn test_parse_file_drops_empty_blocks() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("items.enml");
    fs::write(&path, "item a\n{\n}\nitem b\n{\n\tname = B;\n}\n")?;

    let parsed = parse_file(&path, &["item"])?;
    assert_eq!(parsed.data.len(), 1);
    assert_eq!(parsed.data[0].name(), Some("B"));
    assert!(parsed.diagnostics.is_empty());
    Ok(())
}

#[test]
fn test_unreadable_file_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();
    fs::write(root.join("armors.enml"), "item a\n{\n\tname = Vest;\n\tarmor = 2;\n}\n")?;
    fs::write(root.join("rings.enml"), [b'i', b't', b'e', b'm', b' ', 0xFF, b'\n'])?;

    let parsed = parse_folder(root, &file_map(), &["item"])?;
    assert_eq!(parsed.data.get("armor").len(), 1);
    assert!(parsed.data.get("ring").is_empty());

    assert_eq!(parsed.diagnostics.len(), 1);
    let warning = parsed.diagnostics.iter().next().unwrap();
    assert_eq!(warning.source, "rings.enml");
    assert!(warning.message.contains("unreadable"));
    Ok(())
}

#[test]
fn test_encode_then_decode_keeps_entities() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let json_path = temp_dir.path().join("items.json");
    let enml_path = temp_dir.path().join("items.enml");
    fs::write(
        &json_path,
        r#"[{"name": "Shield {Old}", "armor": 3}, {"name": "Note // 2", "tag": "12"}]"#,
    )?;

    enml_encode(&json_path, &Some(enml_path.clone()), "item")?;
    let parsed = parse_file(&enml_path, &["item"])?;

    let expected: Vec<Entity> = serde_json::from_str(&fs::read_to_string(&json_path)?)?;
    assert_eq!(parsed.data, expected);
    assert!(parsed.diagnostics.is_empty());
    Ok(())
}
