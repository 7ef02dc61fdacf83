//! Loading tables and engine config from files

use makes_sense::*;
use std::fs;
use tempfile::TempDir;

const ACCESS: &str = r#"
name: access_level
args: [user]
conditions:
  - name: is_admin
    type: bool
  - name: plan
    type: enum
    values: [free, pro]
rows:
  - when: [t, any]
    then: full
  - when: [f, pro]
    then: extended
  - when: [f, free]
    then: { arg: user }
"#;

#[test]
fn test_load_yaml_file_and_dispatch() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("access.yaml");
    fs::write(&path, ACCESS).unwrap();

    let table = TableDefinition::load(&path)
        .unwrap()
        .into_table(&EngineConfig::default())
        .unwrap();
    assert!(table.validate().is_success());

    let dispatcher = table
        .bind_ruleset(
            Ruleset::new()
                .condition("is_admin", ["user"], |a| {
                    Literal::Bool(a.get("user") == Some(&Literal::from("root")))
                })
                .condition("plan", ["user"], |a| {
                    if a.get("user") == Some(&Literal::from("carol")) {
                        Literal::from("pro")
                    } else {
                        Literal::from("free")
                    }
                }),
        )
        .unwrap();

    let run = |user: &str| dispatcher.dispatch(&Args::new().with("user", user)).unwrap();
    assert_eq!(run("root"), Literal::from("full"));
    assert_eq!(run("carol"), Literal::from("extended"));
    assert_eq!(run("dave"), Literal::from("dave"));
}

#[test]
fn test_load_json_file() {
    let dir = TempDir::new().unwrap();
    let yaml_def = TableDefinition::from_yaml(ACCESS).unwrap();
    let path = dir.path().join("access.json");
    fs::write(&path, yaml_def.to_json().unwrap()).unwrap();

    let def = TableDefinition::load(&path).unwrap();
    assert_eq!(def.name, "access_level");
    assert_eq!(def.rows.len(), 3);
}

#[test]
fn test_config_limits_table_size() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("makes-sense.yaml"), "max_universe: 3\n").unwrap();

    let config = EngineConfig::discover(dir.path()).unwrap();
    assert_eq!(config.max_universe, 3);

    let err = TableDefinition::from_yaml(ACCESS)
        .unwrap()
        .into_table(&config)
        .unwrap_err();
    assert!(matches!(err, Error::Definition(_)));
}

#[test]
fn test_discover_without_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    assert_eq!(EngineConfig::discover(dir.path()).unwrap(), EngineConfig::default());
}

#[test]
fn test_report_json_shape() {
    let yaml = r#"
name: partial
conditions:
  - name: a
    type: bool
rows:
  - when: [f]
    then: 0
  - when: [f]
    then: 1
"#;
    let table = TableDefinition::from_yaml(yaml)
        .unwrap()
        .into_table(&EngineConfig::default())
        .unwrap();
    let report = ValidationReport::new(&table, &table.validate());
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["is_valid"], false);
    assert_eq!(json["missing_count"], 1);
    assert_eq!(json["duplicate_count"], 1);
    assert_eq!(json["issues"][0]["kind"], "missing");
    assert_eq!(json["issues"][0]["expected"]["a"], true);
    assert_eq!(json["issues"][1]["kind"], "duplicate");
    assert_eq!(json["issues"][1]["rows"], serde_json::json!([0, 1]));
}
