use docshell::{Db, IndexSpec};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== docshell Builder Demo ===\n");

    let mut db = Db::new();
    println!("{}", db.create_collection("users")?);

    let users = db.register_collection("users");

    println!("\n1. Writing documents...");
    println!(
        "{}",
        users.insert([
            json!({"id": "1", "name": "Alice", "age": 30}),
            json!({"id": "2", "name": "Bob", "age": 25}),
        ])?
    );
    println!(
        "{}",
        users.update_id(json!("2"), json!({"$inc": {"age": 1}}))?
    );

    println!("\n2. Indexes...");
    println!(
        "{}",
        users.ensure_index(IndexSpec::on(["name"]).with_name("byName").unique())?
    );
    println!("{}", users.get_indexes()?);

    println!("\n3. Queries...");
    let page = users
        .find(json!({"age": {"$gte": 18}}))
        .sort(["-age", "name"])
        .offset(10)
        .limit(10)
        .project(json!({"name": 1}))
        .result()?;
    println!("{}", page);
    println!("{}", users.find_one(json!({"name": "Alice"}))?);
    println!("{}", users.find(json!({"age": 25})).count()?);

    // the query was reset by count(), so this starts from scratch
    println!("{}", users.query().explain()?);

    println!("\n4. Admin...");
    println!("{}", users.rename("people")?);
    println!("{}", db.backup("backup.db")?);

    println!("\n=== Demo Complete ===");
    Ok(())
}
