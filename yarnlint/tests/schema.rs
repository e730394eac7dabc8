use std::io::Write;

use yarnlint::schema::ArgType;
use yarnlint::{CommandDef, CommandSchema, SchemaError};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn json_uses_editor_field_names() {
    let schema = CommandSchema::from_json_str(
        r#"{
            "commands": {
                "wait": { "minArgs": 1, "maxArgs": 1, "types": ["number"] },
                "stop": {}
            },
            "enums": { "mood": ["happy", "sad"] }
        }"#,
    )
    .expect("valid schema");

    assert_eq!(
        schema.command("wait"),
        Some(&CommandDef::new().arity(1).types(["number"]))
    );
    assert_eq!(schema.command("stop"), Some(&CommandDef::default()));
    assert_eq!(schema.enums["mood"], vec!["happy", "sad"]);
}

#[test]
fn toml_schema() {
    let schema = CommandSchema::from_toml_str(
        r#"
        [commands.fade]
        minArgs = 1
        types = ["direction"]

        [enums]
        direction = ["in", "out"]
        "#,
    )
    .expect("valid schema");

    let fade = schema.command("fade").expect("fade defined");
    assert_eq!(fade.min_args, Some(1));
    assert_eq!(fade.max_args, None);
    assert!(matches!(schema.resolve_type("direction"), ArgType::Enum(v) if v.len() == 2));
}

#[test]
fn missing_tables_default_to_empty() {
    let schema = CommandSchema::from_json_str("{}").expect("valid schema");
    assert!(schema.commands.is_empty());
    assert!(schema.enums.is_empty());
}

#[test]
fn builtin_types_resolve() {
    let schema = CommandSchema::default().with_enum("number", ["one"]);
    assert_eq!(schema.resolve_type("number"), ArgType::Number);
    assert_eq!(schema.resolve_type("string"), ArgType::String);
    assert_eq!(schema.resolve_type("colour"), ArgType::Unknown);
}

#[test]
fn negative_arity_is_rejected() {
    let err = CommandSchema::from_json_str(r#"{"commands": {"wait": {"minArgs": -1}}}"#)
        .expect_err("negative counts are invalid");
    assert!(matches!(err, SchemaError::Json(_)));
}

#[test]
fn loads_from_toml_and_json_files() {
    let toml = write_temp(".toml", "[commands.stop]\nmaxArgs = 0\n");
    let schema = CommandSchema::from_path(toml.path()).expect("toml loads");
    assert_eq!(schema.command("stop"), Some(&CommandDef::new().max_args(0)));

    let json = write_temp(".json", r#"{"commands": {"stop": {"maxArgs": 0}}}"#);
    let schema = CommandSchema::from_path(json.path()).expect("json loads");
    assert_eq!(schema.command("stop"), Some(&CommandDef::new().max_args(0)));
}

#[test]
fn unsupported_extension() {
    let file = write_temp(".yaml", "commands: {}\n");
    let err = CommandSchema::from_path(file.path()).expect_err("yaml is not supported");
    assert!(matches!(err, SchemaError::UnsupportedFormat(ref ext) if ext == "yaml"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nope.toml");
    let err = CommandSchema::from_path(&path).expect_err("file does not exist");
    assert!(matches!(err, SchemaError::Io { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn invalid_toml_is_reported() {
    let file = write_temp(".toml", "[commands.wait\n");
    let err = CommandSchema::from_path(file.path()).expect_err("broken toml");
    assert!(err.to_string().starts_with("invalid TOML schema"));
}
