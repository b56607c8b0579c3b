/// Syntax tree for shell lines
///
/// A line is a single method chain: a root identifier followed by member
/// accesses, bracket accesses and calls, e.g.
/// `db["my coll"].find({a: 1}).sort("a", "-b")`.
use std::fmt;

use serde_json::Value;

/// A parsed method chain
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub root: String,
    pub steps: Vec<Step>,
}

/// One link of a chain
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// `.name`
    Member(String),
    /// `["name"]`
    Index(String),
    /// `(arg, ...)`, with arguments already converted to JSON values
    Call(Vec<Value>),
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)?;
        for step in &self.steps {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Member(name) => write!(f, ".{}", name),
            Step::Index(name) => write!(f, "[{:?}]", name),
            Step::Call(args) => {
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_normalizes_literals() {
        let chain = Chain {
            root: "db".to_string(),
            steps: vec![
                Step::Index("my coll".to_string()),
                Step::Member("insert".to_string()),
                Step::Call(vec![json!({"a": "b"}), json!(1)]),
            ],
        };
        assert_eq!(chain.to_string(), r#"db["my coll"].insert({"a":"b"}, 1)"#);
    }
}
