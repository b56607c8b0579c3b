//! Line completion

use crate::help::HELP_ENTRIES;

const TOP_LEVEL: &[&str] = &["show collections", "show stats", "db.", "help"];

const DB_METHODS: &[&str] = &["db.createCollection(", "db.backup(", "db.quickCheck()"];

const COLLECTION_METHODS: &[&str] = &[
    "insert",
    "find",
    "findOne",
    "findId",
    "deleteId",
    "update",
    "updateId",
    "upsert",
    "upsertId",
    "ensureIndex",
    "dropIndex",
    "getIndexes",
    "rename",
    "drop",
    "count",
];

const QUERY_METHODS: &[&str] = &[
    "limit(",
    "offset(",
    "sort(",
    "hint(",
    "project(",
    "pretty()",
    "count()",
    "explain()",
    "delete()",
    "update(",
];

/// Completion candidates for `line` given the registered collections.
///
/// Matching is ASCII case-insensitive; candidates keep their own casing.
pub fn complete<'a, I>(line: &str, collections: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let lower = line.to_ascii_lowercase();

    if let Some(rest) = lower.strip_prefix("help ") {
        let prefix = &line[..5];
        return HELP_ENTRIES
            .iter()
            .filter(|e| e.topic.to_ascii_lowercase().starts_with(rest))
            .map(|e| format!("{}{}", prefix, e.topic))
            .collect();
    }

    if !lower.starts_with("db.") {
        return filter_prefix(TOP_LEVEL.iter().map(|s| s.to_string()), &lower);
    }

    let collections: Vec<&str> = collections.into_iter().collect();

    if lower.matches('.').count() == 1 {
        let candidates = DB_METHODS
            .iter()
            .map(|s| s.to_string())
            .chain(collections.iter().map(|c| format!("db.{}.", c)));
        return filter_prefix(candidates, &lower);
    }

    let collection_candidates = || {
        collections
            .iter()
            .flat_map(|c| COLLECTION_METHODS.iter().map(move |m| format!("db.{}.{}(", c, m)))
    };

    let last_dot = line.rfind('.');
    let last_paren = line.rfind(')');

    match (last_dot, last_paren) {
        (Some(dot), paren) if paren.map_or(true, |p| dot > p) => {
            if line.matches('.').count() == 2 && !line.contains('(') {
                filter_prefix(collection_candidates(), &lower)
            } else {
                let prefix = &line[..=dot];
                let partial = &lower[dot + 1..];
                QUERY_METHODS
                    .iter()
                    .filter(|m| m.to_ascii_lowercase().starts_with(partial))
                    .map(|m| format!("{}{}", prefix, m))
                    .collect()
            }
        }
        _ => filter_prefix(collection_candidates(), &lower),
    }
}

fn filter_prefix<I>(candidates: I, lower_line: &str) -> Vec<String>
where
    I: Iterator<Item = String>,
{
    candidates
        .filter(|c| c.to_ascii_lowercase().starts_with(lower_line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLLS: [&str; 2] = ["users", "orders"];

    #[test]
    fn test_top_level() {
        assert_eq!(complete("sh", COLLS), vec!["show collections", "show stats"]);
        assert_eq!(complete("", COLLS).len(), TOP_LEVEL.len());
    }

    #[test]
    fn test_help_topics() {
        let got = complete("help find", COLLS);
        assert_eq!(got, vec!["help find", "help findOne", "help findId"]);
        assert_eq!(complete("HELP dro", COLLS), vec!["HELP dropIndex", "HELP drop"]);
    }

    #[test]
    fn test_db_level() {
        assert_eq!(complete("db.b", COLLS), vec!["db.backup("]);
        assert_eq!(complete("db.u", COLLS), vec!["db.users."]);
        assert_eq!(complete("db.", COLLS).len(), DB_METHODS.len() + COLLS.len());
    }

    #[test]
    fn test_collection_methods() {
        assert_eq!(
            complete("db.users.find", COLLS),
            vec!["db.users.find(", "db.users.findOne(", "db.users.findId("]
        );
    }

    #[test]
    fn test_query_methods() {
        assert_eq!(
            complete("db.users.find({}).li", COLLS),
            vec!["db.users.find({}).limit("]
        );
        assert_eq!(
            complete("db.users.find({}).", COLLS).len(),
            QUERY_METHODS.len()
        );
    }

    #[test]
    fn test_inside_call() {
        // after a closing paren with no dot, fall back to collection methods
        assert!(complete("db.users.find()", COLLS).is_empty());
    }
}
