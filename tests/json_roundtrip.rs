use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;
use treekit::{Indent, JsonWriteOptions, read_json, write_json};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Manifest {
    name: String,
    version: i64,
    tags: Vec<String>,
    parent: Option<Box<Manifest>>,
}

#[test]
fn nested_value_survives_write_then_read() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let p = td.path().join("deep/nested/data.json");
    let v = json!({
        "empty": "",
        "neg": -42,
        "float": -0.5,
        "list": [1, [2, [3, null]], {"k": true}],
        "obj": {"z": 1, "a": 2}
    });
    write_json(&p, &v, &JsonWriteOptions::default())?;
    let back: Value = read_json(&p)?;
    assert_eq!(back, v);
    Ok(())
}

#[test]
fn typed_struct_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let p = td.path().join("manifest.json");
    let m = Manifest {
        name: "child".into(),
        version: -1,
        tags: vec![String::new(), "x".into()],
        parent: Some(Box::new(Manifest {
            name: "root".into(),
            version: 3,
            tags: vec![],
            parent: None,
        })),
    };
    write_json(&p, &m, &JsonWriteOptions::default())?;
    let back: Manifest = read_json(&p)?;
    assert_eq!(back, m);
    Ok(())
}

#[test]
fn default_layout_is_two_spaces_with_trailing_newline() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let p = td.path().join("a.json");
    write_json(&p, &json!({"b": 1, "a": [true]}), &JsonWriteOptions::default())?;
    assert_eq!(
        fs::read_to_string(&p)?,
        "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}\n"
    );
    Ok(())
}

#[test]
fn compact_and_tab_indent() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let p = td.path().join("a.json");
    let v = json!({"k": [1, 2]});

    let compact = JsonWriteOptions {
        indent: Indent::Spaces(0),
        ..Default::default()
    };
    write_json(&p, &v, &compact)?;
    assert_eq!(fs::read_to_string(&p)?, "{\"k\":[1,2]}\n");

    let tabs = JsonWriteOptions {
        indent: "tab".parse()?,
        ..Default::default()
    };
    write_json(&p, &v, &tabs)?;
    assert_eq!(fs::read_to_string(&p)?, "{\n\t\"k\": [\n\t\t1,\n\t\t2\n\t]\n}\n");
    Ok(())
}

#[test]
fn replacer_drops_members() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let p = td.path().join("r.json");
    let opts = JsonWriteOptions {
        replacer: Some(Arc::new(|key: &str, v: Value| -> Option<Value> {
            if key == "secret" { None } else { Some(v) }
        })),
        ..Default::default()
    };
    write_json(&p, &json!({"user": "ann", "secret": "hunter2"}), &opts)?;
    let back: Value = read_json(&p)?;
    assert_eq!(back, json!({"user": "ann"}));
    Ok(())
}

#[test]
fn rewrite_replaces_previous_content() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let p = td.path().join("a.json");
    write_json(&p, &json!({"long": "x".repeat(200)}), &JsonWriteOptions::default())?;
    write_json(&p, &json!(1), &JsonWriteOptions::default())?;
    assert_eq!(fs::read_to_string(&p)?, "1\n");
    Ok(())
}

#[test]
fn bom_prefixed_file_reads() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let p = td.path().join("bom.json");
    fs::write(&p, "\u{feff}{\"ok\": true}")?;
    let v: Value = read_json(&p)?;
    assert_eq!(v, json!({"ok": true}));
    Ok(())
}

#[cfg(unix)]
#[test]
fn mode_applies_only_on_create() -> Result<(), Box<dyn std::error::Error>> {
    use std::os::unix::fs::PermissionsExt;
    let td = tempdir()?;
    let p = td.path().join("m.json");
    let opts = JsonWriteOptions {
        mode: Some(0o600),
        ..Default::default()
    };
    write_json(&p, &json!(1), &opts)?;
    assert_eq!(fs::metadata(&p)?.permissions().mode() & 0o777, 0o600);

    fs::set_permissions(&p, fs::Permissions::from_mode(0o644))?;
    write_json(&p, &json!(2), &opts)?;
    assert_eq!(fs::metadata(&p)?.permissions().mode() & 0o777, 0o644);
    Ok(())
}
