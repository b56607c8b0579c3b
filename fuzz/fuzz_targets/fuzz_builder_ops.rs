#![no_main]

use arbitrary::Arbitrary;
use docshell::Db;
use libfuzzer_sys::fuzz_target;
use serde_json::{json, Value};

#[derive(Arbitrary, Debug)]
enum ChainOp {
    Find(i64),
    FindId(Vec<i64>),
    Limit(u64),
    Offset(u64),
    Sort(Vec<String>),
    Pretty,
}

#[derive(Arbitrary, Debug)]
enum Terminal {
    Count,
    Explain,
    Delete,
    Update(i64),
    Result,
    FindOne(i64),
}

#[derive(Arbitrary, Debug)]
struct Round {
    collection: bool,
    ops: Vec<ChainOp>,
    terminal: Terminal,
}

fuzz_target!(|rounds: Vec<Round>| {
    let mut db = Db::new();
    db.register_collection("a");
    db.register_collection("b");

    for round in rounds.iter().take(50) {
        let name = if round.collection { "a" } else { "b" };
        let Ok(collection) = db.collection(name) else {
            return;
        };

        for op in round.ops.iter().take(20) {
            match op {
                ChainOp::Find(n) => {
                    collection.find(json!({ "n": n }));
                }
                ChainOp::FindId(ids) => {
                    collection.find_id(ids.iter().take(8).map(|id| json!(id)));
                }
                ChainOp::Limit(n) => {
                    collection.query().limit(*n);
                }
                ChainOp::Offset(n) => {
                    collection.query().offset(*n);
                }
                ChainOp::Sort(fields) => {
                    collection.query().sort(fields.iter().take(8).cloned());
                }
                ChainOp::Pretty => {
                    collection.query().pretty();
                }
            }
        }

        let text = match &round.terminal {
            Terminal::Count => collection.query().count().map(String::from),
            Terminal::Explain => collection.query().explain().map(String::from),
            Terminal::Delete => collection.query().delete().map(String::from),
            Terminal::Update(n) => collection.query().update(json!({ "n": n })).map(String::from),
            Terminal::Result => collection.query().result(),
            Terminal::FindOne(n) => collection.find_one(json!({ "n": n })).map(String::from),
        };

        // Every terminal leaves an empty accumulator behind
        assert!(collection.query().spec().is_empty());
        assert!(collection.query().documents().is_none());

        if let Ok(text) = text {
            let value: Value = serde_json::from_str(&text).expect("builder emitted invalid JSON");
            assert_eq!(value["collection"], json!(name));
        }
    }
});
