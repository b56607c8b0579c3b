use docshell::{CommandKind, Db, IndexSpec};
use serde_json::{json, Value};

fn decode(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_insert_wraps_document() {
    let mut db = Db::new();
    for name in ["users", "orders", "a.b", "with space"] {
        let doc = json!({"id": name, "nested": {"list": [1, 2, 3]}});
        let result = db.register_collection(name).insert([doc.clone()]).unwrap();
        assert_eq!(
            decode(result.result()),
            json!({"collection": name, "cmd": "insert", "documents": [doc]})
        );
    }
}

#[test]
fn test_limit_sort_count_payload() {
    let mut db = Db::new();
    let users = db.register_collection("users");
    for n in [0, 1, 25, u64::from(u32::MAX)] {
        let result = users.query().limit(n).sort(["age"]).count().unwrap();
        assert_eq!(
            decode(result.result())["query"],
            json!({"limit": n, "sort": ["age"], "count": true})
        );
    }
}

#[test]
fn test_terminal_resets_for_next_call() {
    let mut db = Db::new();
    let users = db.register_collection("users");

    users
        .find(json!({"age": {"$gt": 18}}))
        .limit(10)
        .offset(5)
        .sort(["-age"])
        .pretty()
        .delete()
        .unwrap();
    assert!(users.query().spec().is_empty());

    let next = users.query().explain().unwrap();
    assert_eq!(
        decode(next.result()),
        json!({"collection": "users", "cmd": "find", "query": {"explain": true}})
    );
}

#[test]
fn test_find_id_does_not_leak_into_find() {
    let mut db = Db::new();
    let users = db.register_collection("users");

    let by_id = users.find_id([json!("a"), json!("b")]).pretty().result().unwrap();
    assert_eq!(
        decode(&by_id),
        json!({
            "collection": "users",
            "cmd": "findId",
            "query": {"pretty": true},
            "documents": ["a", "b"]
        })
    );

    let next = users.find(json!({})).result().unwrap();
    assert_eq!(
        decode(&next),
        json!({"collection": "users", "cmd": "find", "query": {"find": {}}})
    );
}

#[test]
fn test_find_one_forces_limit() {
    let mut db = Db::new();
    let users = db.register_collection("users");

    users.query().limit(50).offset(3);
    let result = users.find_one(json!({"name": "Alice"})).unwrap();
    let command = result.command().unwrap();

    assert_eq!(command.cmd, CommandKind::FindOne);
    let query = command.query.unwrap();
    assert_eq!(query.limit, Some(1));
    assert_eq!(query.offset, Some(3));
    assert_eq!(query.find, Some(json!({"name": "Alice"})));
    assert!(users.query().spec().is_empty());
}

#[test]
fn test_collection_count_ignores_pending_query() {
    let mut db = Db::new();
    let users = db.register_collection("users");
    users.find(json!({"a": 1})).limit(3);

    let result = users.count().unwrap();
    assert_eq!(result.result(), r#"{"collection":"users","cmd":"count"}"#);
    assert_eq!(users.query().spec().limit, Some(3));
}

#[test]
fn test_index_commands() {
    let mut db = Db::new();
    let users = db.register_collection("users");

    let ensure = users
        .ensure_index(IndexSpec::on(["email"]).with_name("byEmail").unique().sparse())
        .unwrap();
    assert_eq!(
        decode(ensure.result())["index"],
        json!({"name": "byEmail", "fields": ["email"], "unique": true, "sparse": true})
    );

    let drop = users.drop_index("byEmail").unwrap();
    assert_eq!(
        drop.result(),
        r#"{"collection":"users","cmd":"dropIndex","index":{"name":"byEmail"}}"#
    );
}

#[test]
fn test_collections_keep_separate_state() {
    let mut db = Db::new();
    db.register_collection("users").find(json!({"a": 1})).limit(2);
    db.register_collection("orders").find(json!({"b": 2}));

    let orders = db.collection("orders").unwrap().query().result().unwrap();
    assert_eq!(
        decode(&orders)["query"],
        json!({"find": {"b": 2}})
    );

    let users = db.collection("users").unwrap().query().result().unwrap();
    assert_eq!(decode(&users)["query"], json!({"find": {"a": 1}, "limit": 2}));
}

#[test]
fn test_result_text_is_stable() {
    let db = Db::new();
    let result = db.backup("/var/backups/db.bak").unwrap();
    assert_eq!(result.result(), result.result());
    assert_eq!(result.to_string(), result.result());
    assert_eq!(String::from(result.clone()), r#"{"cmd":"backup","path":"/var/backups/db.bak"}"#);
}
