//! # docshell
//!
//! Fluent builders that turn document-database shell commands into JSON
//! command descriptors, plus a [`Shell`] that evaluates textual method
//! chains such as `db.users.find({age: 30}).limit(5)` with them.
//!
//! Nothing here talks to a database: the output is the descriptor text a
//! separate server process consumes.
//!
//! ## Quick Start
//!
//! ```rust
//! use docshell::Shell;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut shell = Shell::new();
//!     shell.register_collection("users")?;
//!
//!     let text = shell.evaluate(r#"db.users.find({name: "Alice"}).limit(1)"#)?;
//!     assert_eq!(
//!         text,
//!         r#"{"collection":"users","cmd":"find","query":{"find":{"name":"Alice"},"limit":1}}"#
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Builders
//!
//! ```rust
//! use docshell::{Db, IndexSpec};
//! use serde_json::json;
//!
//! let mut db = Db::new();
//! let users = db.register_collection("users");
//!
//! let insert = users.insert([json!({"id": "1", "name": "Alice"})])?;
//! let index = users.ensure_index(IndexSpec::on(["name"]).unique())?;
//! let page = users.find(json!({})).sort(["-age"]).offset(20).limit(10).result()?;
//! # let _ = (insert, index, page);
//! # Ok::<(), docshell::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fs;
use std::path::Path;

// Re-export core types
pub use docshell_core::{
    Collection, Command, CommandKind, CommandResult, Db, Error, IndexHints, IndexSpec, Query,
    QuerySpec, Result,
};

// Shell-line front end
pub use docshell_core::script;

pub mod complete;
pub mod config;
pub mod help;
pub mod logging;
pub mod security;

pub use config::ShellConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shell commands that are not method chains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `show collections`
    ShowCollections,
    /// `show stats`
    ShowStats,
}

/// A classified shell line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellInput {
    /// `help` with an optional topic (empty for the overview)
    Help(String),
    /// A builtin command
    Builtin(Builtin),
    /// A `db.` method chain, evaluated to its descriptor
    Command(Command),
}

/// Evaluates shell lines into command descriptors.
///
/// Holds the database handle and its registered collections. Every line is
/// finalized, or discarded if it fails part way, so each one starts from an
/// empty query.
#[derive(Debug, Default)]
pub struct Shell {
    db: Db,
    config: ShellConfig,
}

impl Shell {
    /// Creates a shell with default configuration and no collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shell and registers the configured collections.
    pub fn with_config(config: ShellConfig) -> Result<Self> {
        let mut shell = Shell {
            db: Db::new(),
            config,
        };
        for name in shell.config.collections.clone() {
            shell.register_collection(name)?;
        }
        Ok(shell)
    }

    /// Active configuration.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// The underlying database handle, for direct builder use.
    pub fn db(&mut self) -> &mut Db {
        &mut self.db
    }

    /// Makes `db.<name>` addressable.
    pub fn register_collection(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        security::validate_collection_name(&name)?;
        self.db.register_collection(name);
        Ok(())
    }

    /// Forgets a collection. Returns false if it was not registered.
    pub fn unregister_collection(&mut self, name: &str) -> bool {
        self.db.unregister_collection(name)
    }

    /// Registered collection names in sorted order.
    pub fn collection_names(&self) -> Vec<String> {
        self.db.collection_names().map(str::to_string).collect()
    }

    /// Evaluates a `db.` line and returns the command text.
    ///
    /// The line is finalized as if `.result()` had been appended, so
    /// `db.users.find()` yields the same text as
    /// `db.users.find().result()`.
    pub fn evaluate(&mut self, line: &str) -> Result<String> {
        let text = self.evaluate_compact(line)?;
        if self.config.pretty_output {
            Command::from_json(&text)?.to_json_pretty()
        } else {
            Ok(text)
        }
    }

    /// Evaluates a `db.` line and decodes the result.
    pub fn get_command(&mut self, line: &str) -> Result<Command> {
        let text = self.evaluate_compact(line)?;
        Command::from_json(&text)
    }

    /// Classifies a line: help, builtin or command.
    ///
    /// Blank lines yield `None`. Anything starting with `help` is a help
    /// request for the rest of the line, so `helpme` asks about `me`.
    pub fn interpret(&mut self, line: &str) -> Result<Option<ShellInput>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(topic) = line.strip_prefix("help") {
            return Ok(Some(ShellInput::Help(topic.trim().to_string())));
        }

        if line.starts_with("db.") || line.starts_with("db[") {
            return self.get_command(line).map(|c| Some(ShellInput::Command(c)));
        }

        match line {
            "show collections" => Ok(Some(ShellInput::Builtin(Builtin::ShowCollections))),
            "show stats" => Ok(Some(ShellInput::Builtin(Builtin::ShowStats))),
            other => Err(Error::InvalidOperation(format!(
                "unexpected command: {}",
                other
            ))),
        }
    }

    /// Help text for a topic, or the command overview for an empty topic.
    pub fn help(&self, topic: &str) -> Result<String> {
        help::render(topic)
    }

    /// Completion candidates for a partially typed line.
    pub fn complete(&self, line: &str) -> Vec<String> {
        complete::complete(line, self.db.collection_names())
    }

    /// Evaluates every command line of a script file.
    ///
    /// Blank lines and `//` comments are skipped. Evaluation stops at the
    /// first failing line, reported with its line number.
    pub fn run_script<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<Command>> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "running script");

        let mut commands = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let command = self.get_command(line).map_err(|error| Error::AtLine {
                line: index + 1,
                error: Box::new(error),
            })?;
            commands.push(command);
        }

        tracing::debug!(count = commands.len(), "script evaluated");
        Ok(commands)
    }

    fn evaluate_compact(&mut self, line: &str) -> Result<String> {
        security::validate_line(line, self.config.max_line_length)?;
        script::evaluate(&mut self.db, line.trim())
    }
}
