/// Evaluator for parsed shell lines
///
/// Walks a [`Chain`] against a [`Db`], dispatching each call onto the
/// builders. Arguments are converted from JSON into the builders' typed
/// parameters here.
use serde_json::Value;

use super::ast::{Chain, Step};
use super::parser::parse_line;
use crate::command::{IndexHints, IndexSpec};
use crate::db::Db;
use crate::result::CommandResult;
use crate::{Error, Result};

/// Name the database handle is bound to in shell lines
pub const ROOT: &str = "db";

/// What a chain evaluates to
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// The database handle itself
    Db,
    /// A registered collection handle
    Collection(String),
    /// The open query of a collection
    Query(String),
    /// A finalized result wrapper
    Finished(CommandResult),
    /// Command text returned by an explicit `result()`
    Text(String),
}

impl Target {
    fn describe(&self) -> &'static str {
        match self {
            Target::Db => "db",
            Target::Collection(_) => "collection",
            Target::Query(_) => "query",
            Target::Finished(_) => "result",
            Target::Text(_) => "string",
        }
    }
}

/// Evaluates chains against a database handle
pub struct Evaluator<'a> {
    db: &'a mut Db,
    // collection whose query the chain has written to
    touched: Option<String>,
}

impl<'a> Evaluator<'a> {
    pub fn new(db: &'a mut Db) -> Self {
        Self { db, touched: None }
    }

    /// Evaluates every step of the chain and returns the final value
    pub fn eval(&mut self, chain: &Chain) -> Result<Target> {
        if chain.root != ROOT {
            return Err(Error::InvalidOperation(format!(
                "'{}' is not defined",
                chain.root
            )));
        }

        let mut target = Target::Db;
        let mut steps = chain.steps.iter().peekable();

        while let Some(step) = steps.next() {
            target = match step {
                Step::Member(name) => {
                    if let Some(Step::Call(args)) = steps.peek() {
                        steps.next();
                        self.call(target, name, args)?
                    } else {
                        self.property(target, name)?
                    }
                }
                Step::Index(name) => self.property(target, name)?,
                Step::Call(_) => {
                    return Err(Error::InvalidOperation(format!(
                        "{} is not callable",
                        target.describe()
                    )))
                }
            };
        }

        Ok(target)
    }

    /// Applies an implicit `result()` to the final value
    pub fn finish(&mut self, target: Target) -> Result<String> {
        match target {
            Target::Query(collection) => self.db.collection(&collection)?.query().result(),
            Target::Finished(result) => Ok(result.into_string()),
            Target::Text(text) => Ok(text),
            other => Err(Error::InvalidOperation(format!(
                "{} does not produce a command",
                other.describe()
            ))),
        }
    }

    /// Resets the query of the collection the chain reached, if any.
    ///
    /// Called when a line fails part way, so the options it set before
    /// failing do not carry over to the next line.
    pub fn discard(&mut self) {
        if let Some(name) = self.touched.take() {
            if let Ok(collection) = self.db.collection(&name) {
                collection.query().reset();
            }
        }
    }

    fn property(&mut self, target: Target, name: &str) -> Result<Target> {
        match target {
            Target::Db => {
                self.db.collection(name)?;
                Ok(Target::Collection(name.to_string()))
            }
            other => Err(Error::InvalidOperation(format!(
                "{} has no property '{}'",
                other.describe(),
                name
            ))),
        }
    }

    fn call(&mut self, target: Target, method: &str, args: &[Value]) -> Result<Target> {
        match target {
            Target::Db => self.call_db(method, args),
            Target::Collection(name) => self.call_collection(name, method, args),
            Target::Query(name) => self.call_query(name, method, args),
            Target::Finished(result) if method == "result" => {
                Ok(Target::Text(result.into_string()))
            }
            other => Err(unknown_method(&other, method)),
        }
    }

    fn call_db(&mut self, method: &str, args: &[Value]) -> Result<Target> {
        let result = match method {
            "createCollection" => self.db.create_collection(string_arg(method, args, 0)?)?,
            "backup" => self.db.backup(string_arg(method, args, 0)?)?,
            "quickCheck" => self.db.quick_check()?,
            _ => return Err(unknown_method(&Target::Db, method)),
        };
        Ok(Target::Finished(result))
    }

    fn call_collection(&mut self, name: String, method: &str, args: &[Value]) -> Result<Target> {
        let collection = self.db.collection(&name)?;
        self.touched = Some(name.clone());
        let result = match method {
            "find" => {
                collection.find(value_arg(args, 0));
                return Ok(Target::Query(name));
            }
            "findId" => {
                collection.find_id(args.iter().cloned());
                return Ok(Target::Query(name));
            }
            "findOne" => collection.find_one(value_arg(args, 0))?,
            "count" => collection.count()?,
            "ensureIndex" => collection.ensure_index(index_arg(method, args)?)?,
            "dropIndex" => collection.drop_index(string_arg(method, args, 0)?)?,
            "getIndexes" => collection.get_indexes()?,
            "drop" => collection.drop_collection()?,
            "rename" => collection.rename(string_arg(method, args, 0)?)?,
            "insert" => collection.insert(args.iter().cloned())?,
            "upsert" => collection.upsert(args.iter().cloned())?,
            "update" => collection.update(args.iter().cloned())?,
            "deleteId" => collection.delete_id(args.iter().cloned())?,
            "updateId" | "upsertId" => {
                if args.len() < 2 {
                    return Err(Error::invalid_argument(method, "expected id and modifier"));
                }
                let (id, modifier) = (args[0].clone(), args[1].clone());
                if method == "updateId" {
                    collection.update_id(id, modifier)?
                } else {
                    collection.upsert_id(id, modifier)?
                }
            }
            _ => return Err(unknown_method(&Target::Collection(name), method)),
        };
        Ok(Target::Finished(result))
    }

    fn call_query(&mut self, name: String, method: &str, args: &[Value]) -> Result<Target> {
        let query = self.db.collection(&name)?.query();
        let result = match method {
            "limit" => {
                query.limit(count_arg(method, args)?);
                return Ok(Target::Query(name));
            }
            "offset" => {
                query.offset(count_arg(method, args)?);
                return Ok(Target::Query(name));
            }
            "sort" => {
                query.sort(sort_args(method, args)?);
                return Ok(Target::Query(name));
            }
            "hint" => {
                query.hint(hint_arg(method, args)?);
                return Ok(Target::Query(name));
            }
            "project" => {
                let projection = args
                    .first()
                    .cloned()
                    .ok_or_else(|| Error::invalid_argument(method, "expected a projection"))?;
                query.project(projection);
                return Ok(Target::Query(name));
            }
            "pretty" => {
                query.pretty();
                return Ok(Target::Query(name));
            }
            "count" => query.count()?,
            "explain" => query.explain()?,
            "delete" => query.delete()?,
            "update" => query.update(value_arg(args, 0))?,
            "result" => return query.result().map(Target::Text),
            _ => return Err(unknown_method(&Target::Query(name), method)),
        };
        Ok(Target::Finished(result))
    }
}

/// Parses and evaluates a line, then applies `result()` to it.
///
/// A line that fails leaves no query state behind.
pub fn evaluate(db: &mut Db, line: &str) -> Result<String> {
    let chain = parse_line(line)?;
    tracing::debug!(%chain, "evaluating shell line");
    let mut evaluator = Evaluator::new(db);
    let result = evaluator
        .eval(&chain)
        .and_then(|target| evaluator.finish(target));
    if let Err(error) = &result {
        tracing::debug!(%error, "discarding partial chain");
        evaluator.discard();
    }
    result
}

fn unknown_method(target: &Target, method: &str) -> Error {
    Error::UnknownMethod {
        target: target.describe().to_string(),
        method: method.to_string(),
    }
}

fn value_arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Null)
}

fn string_arg(method: &str, args: &[Value], index: usize) -> Result<String> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(Error::invalid_argument(
            method,
            format!("expected a string, got {}", other),
        )),
        None => Err(Error::invalid_argument(method, "expected a string")),
    }
}

fn count_arg(method: &str, args: &[Value]) -> Result<u64> {
    let value = args
        .first()
        .ok_or_else(|| Error::invalid_argument(method, "expected a non-negative integer"))?;
    value
        .as_u64()
        .or_else(|| {
            // 10.0 is as good as 10
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        })
        .ok_or_else(|| {
            Error::invalid_argument(
                method,
                format!("expected a non-negative integer, got {}", value),
            )
        })
}

fn sort_args(method: &str, args: &[Value]) -> Result<Vec<String>> {
    let fields = match args {
        [Value::Array(items)] => items.as_slice(),
        _ => args,
    };
    fields
        .iter()
        .map(|field| match field {
            Value::String(s) => Ok(s.clone()),
            other => Err(Error::invalid_argument(
                method,
                format!("sort fields must be strings, got {}", other),
            )),
        })
        .collect()
}

fn hint_arg(method: &str, args: &[Value]) -> Result<IndexHints> {
    let Some(Value::Object(map)) = args.first() else {
        return Err(Error::invalid_argument(
            method,
            "expected an object of index names to boosts",
        ));
    };
    map.iter()
        .map(|(name, boost)| {
            boost
                .as_i64()
                .map(|boost| (name.clone(), boost))
                .ok_or_else(|| {
                    Error::invalid_argument(
                        method,
                        format!("boost for '{}' must be an integer", name),
                    )
                })
        })
        .collect()
}

fn index_arg(method: &str, args: &[Value]) -> Result<IndexSpec> {
    match args.first() {
        None | Some(Value::Null) => Ok(IndexSpec::default()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| Error::invalid_argument(method, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn db() -> Db {
        let mut db = Db::new();
        db.register_collection("coll");
        db
    }

    fn eval_json(db: &mut Db, line: &str) -> Value {
        serde_json::from_str(&evaluate(db, line).unwrap()).unwrap()
    }

    #[test]
    fn test_find_chain() {
        let mut db = db();
        let value = eval_json(&mut db, r#"db.coll.find({a:"b"}).limit(1).offset(2).sort("a", "-b")"#);
        assert_eq!(
            value,
            json!({
                "collection": "coll",
                "cmd": "find",
                "query": {"find": {"a": "b"}, "limit": 1, "offset": 2, "sort": ["a", "-b"]}
            })
        );
    }

    #[test]
    fn test_bare_find_and_explicit_result() {
        let mut db = db();
        assert_eq!(
            evaluate(&mut db, "db.coll.find()").unwrap(),
            r#"{"collection":"coll","cmd":"find","query":{"find":{}}}"#
        );
        assert_eq!(
            evaluate(&mut db, "db.coll.count().result()").unwrap(),
            r#"{"collection":"coll","cmd":"count"}"#
        );
    }

    #[test]
    fn test_index_access_to_collection() {
        let mut db = db();
        db.register_collection("my coll");
        let value = eval_json(&mut db, r#"db["my coll"].drop()"#);
        assert_eq!(value, json!({"collection": "my coll", "cmd": "drop"}));
    }

    #[test]
    fn test_query_terminals() {
        let mut db = db();
        let value = eval_json(&mut db, r#"db.coll.find({a:"b"}).update({b:"c"})"#);
        assert_eq!(value["query"], json!({"find": {"a": "b"}, "update": {"b": "c"}}));

        let value = eval_json(&mut db, "db.coll.find().update()");
        assert_eq!(value["query"], json!({"find": {}, "update": {}}));

        let value = eval_json(&mut db, "db.coll.find({x: 1}).hint({byX: 2}).explain()");
        assert_eq!(
            value["query"],
            json!({"find": {"x": 1}, "hint": {"byX": 2}, "explain": true})
        );
    }

    #[test]
    fn test_sort_accepts_array() {
        let mut db = db();
        let value = eval_json(&mut db, r#"db.coll.find().sort(["a", "-b"])"#);
        assert_eq!(value["query"]["sort"], json!(["a", "-b"]));
    }

    #[test]
    fn test_db_methods() {
        let mut db = db();
        let value = eval_json(&mut db, r#"db.createCollection("collName")"#);
        assert_eq!(value, json!({"collection": "collName", "cmd": "createCollection"}));

        let value = eval_json(&mut db, "db.quickCheck()");
        assert_eq!(value, json!({"cmd": "quickCheck"}));
    }

    #[test]
    fn test_ensure_index_maps_fields() {
        let mut db = db();
        let value = eval_json(
            &mut db,
            r#"db.coll.ensureIndex({name: "ab", fields: ["a", "b"], unique: true})"#,
        );
        assert_eq!(
            value["index"],
            json!({"name": "ab", "fields": ["a", "b"], "unique": true})
        );

        let err = evaluate(&mut db, "db.coll.ensureIndex({fields: 1})").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { ref method, .. } if method == "ensureIndex"));
    }

    #[test]
    fn test_state_not_leaked_between_lines() {
        let mut db = db();
        evaluate(&mut db, "db.coll.find({a: 1}).limit(3).count()").unwrap();
        let value = eval_json(&mut db, "db.coll.findId(1, 2)");
        assert_eq!(
            value,
            json!({"collection": "coll", "cmd": "findId", "query": {}, "documents": [1, 2]})
        );
        let value = eval_json(&mut db, "db.coll.find()");
        assert_eq!(value, json!({"collection": "coll", "cmd": "find", "query": {"find": {}}}));
    }

    #[test]
    fn test_errors() {
        let mut db = db();
        assert!(matches!(
            evaluate(&mut db, "db.missing.find()").unwrap_err(),
            Error::UnknownCollection(name) if name == "missing"
        ));
        assert!(matches!(
            evaluate(&mut db, "db.coll.frob()").unwrap_err(),
            Error::UnknownMethod { target, method } if target == "collection" && method == "frob"
        ));
        assert!(matches!(
            evaluate(&mut db, r#"db.coll.find().limit("x")"#).unwrap_err(),
            Error::InvalidArgument { .. }
        ));
        assert!(matches!(
            evaluate(&mut db, "db.coll.find().limit(-1)").unwrap_err(),
            Error::InvalidArgument { .. }
        ));
        assert!(matches!(
            evaluate(&mut db, "db.coll").unwrap_err(),
            Error::InvalidOperation(_)
        ));
        assert!(matches!(
            evaluate(&mut db, "other.coll.find()").unwrap_err(),
            Error::InvalidOperation(_)
        ));
        assert!(matches!(
            evaluate(&mut db, "db.coll.find(").unwrap_err(),
            Error::Parse(_)
        ));
        assert!(matches!(
            evaluate(&mut db, "db.coll.updateId(1)").unwrap_err(),
            Error::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_failed_chain_does_not_leak_options() {
        let mut db = db();
        assert!(evaluate(&mut db, "db.coll.find({a: 1}).limit(5).sort(1)").is_err());
        assert_eq!(
            evaluate(&mut db, "db.coll.find({b: 2}).count()").unwrap(),
            r#"{"collection":"coll","cmd":"find","query":{"find":{"b":2},"count":true}}"#
        );
    }

    #[test]
    fn test_failed_find_id_does_not_leak_ids() {
        let mut db = db();
        assert!(evaluate(&mut db, "db.coll.findId(1).frob()").is_err());
        assert_eq!(
            evaluate(&mut db, "db.coll.find()").unwrap(),
            r#"{"collection":"coll","cmd":"find","query":{"find":{}}}"#
        );
        assert!(db.collection("coll").unwrap().query().documents().is_none());
    }

    #[test]
    fn test_float_limit_accepted_when_integral() {
        let mut db = db();
        let value = eval_json(&mut db, "db.coll.find().limit(10.0)");
        assert_eq!(value["query"]["limit"], json!(10));
    }
}
