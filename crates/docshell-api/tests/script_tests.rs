use std::fs;

use docshell::{Builtin, CommandKind, Error, Shell, ShellConfig, ShellInput};
use serde_json::json;
use tempfile::tempdir;

#[test]
fn test_script_with_comments_and_multiple_collections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("migrate.js");
    fs::write(
        &path,
        r#"
// schema
db.createCollection("audit")
db.users.ensureIndex({name: "byEmail", fields: ["email"], unique: true})

   // data
db.users.insert({id: "1", email: "a@example.com"}, {id: "2", email: "b@example.com"})
db.users.find({email: {$regex: "example"}}).sort("-email").limit(10)
db.orders.find({userId: "1"}).delete()
"#,
    )
    .unwrap();

    let mut shell =
        Shell::with_config(ShellConfig::default().with_collections(["users", "orders"])).unwrap();
    let commands = shell.run_script(&path).unwrap();

    let kinds: Vec<CommandKind> = commands.iter().map(|c| c.cmd).collect();
    assert_eq!(
        kinds,
        [
            CommandKind::CreateCollection,
            CommandKind::EnsureIndex,
            CommandKind::Insert,
            CommandKind::Find,
            CommandKind::Find,
        ]
    );
    assert_eq!(commands[2].documents.as_ref().map(Vec::len), Some(2));

    let query = commands[3].query.as_ref().unwrap();
    assert_eq!(query.find, Some(json!({"email": {"$regex": "example"}})));
    assert_eq!(query.sort, Some(vec!["-email".to_string()]));
    assert!(commands[4].query.as_ref().unwrap().delete);
}

#[test]
fn test_script_parse_error_has_line_number() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.js");
    fs::write(&path, "// ok\ndb.users.count()\n\ndb.users.find({a: }\n").unwrap();

    let mut shell = Shell::with_config(ShellConfig::default().with_collections(["users"])).unwrap();
    let err = shell.run_script(&path).unwrap_err();
    assert!(err.to_string().starts_with("line 4: Parse error"));
    assert!(matches!(err, Error::AtLine { line: 4, .. }));
}

#[test]
fn test_interactive_session() {
    let mut shell = Shell::new();
    shell.register_collection("users").unwrap();

    let inputs = [
        "show collections",
        "help sort",
        "db.users.find().limit(2)",
        "",
    ];
    let outputs: Vec<_> = inputs
        .iter()
        .map(|line| shell.interpret(line).unwrap())
        .collect();

    assert_eq!(outputs[0], Some(ShellInput::Builtin(Builtin::ShowCollections)));
    assert_eq!(outputs[1], Some(ShellInput::Help("sort".to_string())));
    match &outputs[2] {
        Some(ShellInput::Command(cmd)) => {
            assert_eq!(cmd.collection.as_deref(), Some("users"));
            assert_eq!(cmd.query.as_ref().and_then(|q| q.limit), Some(2));
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert_eq!(outputs[3], None);

    let help = shell.help("sort").unwrap();
    assert!(help.contains("descending"));
    assert!(matches!(shell.help("frobnicate"), Err(Error::NoHelp(_))));
}

#[test]
fn test_completion_follows_registry() {
    let mut shell = Shell::new();
    shell.register_collection("users").unwrap();
    shell.register_collection("uploads").unwrap();

    assert_eq!(shell.complete("db.u"), vec!["db.uploads.", "db.users."]);
    assert_eq!(shell.complete("db.users.dr"), vec!["db.users.dropIndex(", "db.users.drop("]);

    assert!(shell.unregister_collection("uploads"));
    assert_eq!(shell.complete("db.u"), vec!["db.users."]);
    assert_eq!(shell.collection_names(), vec!["users"]);
}

#[test]
fn test_unknown_collection_after_unregister() {
    let mut shell = Shell::new();
    shell.register_collection("users").unwrap();
    shell.unregister_collection("users");
    assert!(matches!(
        shell.evaluate("db.users.count()"),
        Err(Error::UnknownCollection(name)) if name == "users"
    ));
}
