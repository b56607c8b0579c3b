//! Help catalog for shell commands

use docshell_core::{Error, Result};

/// A help entry: topic, description, example line
pub struct HelpEntry {
    /// Command or chain method name
    pub topic: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Example usage
    pub example: &'static str,
}

const fn entry(
    topic: &'static str,
    description: &'static str,
    example: &'static str,
) -> HelpEntry {
    HelpEntry {
        topic,
        description,
        example,
    }
}

/// Every documented topic
pub const HELP_ENTRIES: &[HelpEntry] = &[
    entry("show collections", "Show all collections in the database", "show collections"),
    entry("show stats", "Show database statistics", "show stats"),
    entry("quickCheck", "Check database integrity quickly", "db.quickCheck()"),
    entry("createCollection", "Create a new collection", r#"db.createCollection("myCollection")"#),
    entry("backup", "Back up the database to a file", r#"db.backup("backup.db")"#),
    entry("rename", "Rename the collection", r#"db.collection.rename("newName")"#),
    entry(
        "insert",
        "Insert one or more documents into a collection",
        r#"db.collection.insert({id: "1", name: "test"})"#,
    ),
    entry(
        "update",
        "Update whole documents in a collection, or the documents matched by a query",
        r#"db.collection.update({id: "1", name: "new name"})"#,
    ),
    entry(
        "updateId",
        "Update a document by id with a modifier",
        r#"db.collection.updateId("1", {$set: {name: "new name"}})"#,
    ),
    entry(
        "upsert",
        "Insert documents or replace them if they exist",
        r#"db.collection.upsert({id: "1", name: "test"})"#,
    ),
    entry(
        "upsertId",
        "Upsert a document by id with a modifier",
        r#"db.collection.upsertId("1", {$set: {name: "new name"}})"#,
    ),
    entry("count", "Count documents in a collection", "db.collection.count()"),
    entry(
        "find",
        "Find documents in a collection",
        r#"db.collection.find({name: "test"}).limit(10)"#,
    ),
    entry("findOne", "Find one document in a collection", r#"db.collection.findOne({id: "1"})"#),
    entry("findId", "Find documents by id", r#"db.collection.findId("1", "2")"#),
    entry("deleteId", "Delete documents by id", r#"db.collection.deleteId("1", "2")"#),
    entry(
        "ensureIndex",
        "Create an index on a collection if it does not exist",
        r#"db.collection.ensureIndex({name: "indexName", fields: ["fieldName"], unique: true})"#,
    ),
    entry("dropIndex", "Drop an index from a collection", r#"db.collection.dropIndex("indexName")"#),
    entry("getIndexes", "List the indexes of a collection", "db.collection.getIndexes()"),
    entry("drop", "Drop a collection", "db.collection.drop()"),
    entry(
        "limit",
        "Limit the number of documents returned by a query",
        "db.collection.find({}).limit(10)",
    ),
    entry("offset", "Skip a number of documents in a query", "db.collection.find({}).offset(20)"),
    entry(
        "sort",
        "Sort the documents returned by a query; prefix a field with - for descending",
        r#"db.collection.find({}).sort("name", "-age")"#,
    ),
    entry("hint", "Prefer specific indexes", "db.collection.find({}).hint({indexName: 1})"),
    entry(
        "project",
        "Choose the fields to return",
        "db.collection.find({}).project({name: 1, age: 1})",
    ),
    entry("pretty", "Pretty-print the output", "db.collection.find({}).pretty()"),
    entry("explain", "Show the query execution plan", "db.collection.find({}).explain()"),
    entry(
        "delete",
        "Delete the documents matched by a query",
        r#"db.collection.find({status: "old"}).delete()"#,
    ),
];

const OVERVIEW: &str = "Available commands:
  show collections
  show stats
  db
    .createCollection(name)
    .backup(path)
    .quickCheck()
    .{collection}
      .insert(doc, ...)
      .upsert(doc, ...)
      .upsertId(id, mod)
      .find(query)
        .limit(n)
        .offset(n)
        .sort(field, ...)
        .project(spec)
        .hint(spec)
        .count()
        .explain()
        .pretty()
        .update(doc)
        .delete()
      .findOne(query)
      .findId(id, ...)
      .update(doc, ...)
      .updateId(id, mod)
      .deleteId(id, ...)
      .count()
      .ensureIndex(indexDef)
      .dropIndex(name)
      .getIndexes()
      .rename(newName)
      .drop()

Use \"help {command}\" for more information on a specific command.";

/// Looks up the entry for a topic
pub fn lookup(topic: &str) -> Option<&'static HelpEntry> {
    HELP_ENTRIES.iter().find(|e| e.topic == topic)
}

/// Renders help for a topic, or the overview when the topic is blank
///
/// Topics written as a chain (`db.users.find`) resolve to their last
/// segment.
pub fn render(topic: &str) -> Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Ok(OVERVIEW.to_string());
    }

    let found = lookup(topic).or_else(|| {
        topic
            .strip_prefix("db.")
            .and_then(|rest| rest.rsplit('.').next())
            .and_then(lookup)
    });

    found
        .map(|e| format!("Description: {}\nExample: {}", e.description, e.example))
        .ok_or_else(|| Error::NoHelp(topic.to_string()))
}
