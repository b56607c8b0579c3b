//! Command descriptors.
//!
//! A [`Command`] is the JSON object handed to the database process: the
//! collection it targets, an operation tag and an operation-specific
//! payload. Builders produce them; [`Command::from_json`] reads them back.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Index hints: index name to boost.
pub type IndexHints = BTreeMap<String, i64>;

/// Operation tag carried in the `cmd` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommandKind {
    CreateCollection,
    Backup,
    QuickCheck,
    Find,
    FindOne,
    FindId,
    Count,
    EnsureIndex,
    DropIndex,
    GetIndexes,
    Drop,
    Rename,
    Insert,
    Upsert,
    Update,
    UpdateId,
    UpsertId,
    DeleteId,
}

impl CommandKind {
    /// Every operation tag, database-level ones first.
    pub const ALL: [CommandKind; 18] = [
        CommandKind::CreateCollection,
        CommandKind::Backup,
        CommandKind::QuickCheck,
        CommandKind::Find,
        CommandKind::FindOne,
        CommandKind::FindId,
        CommandKind::Count,
        CommandKind::EnsureIndex,
        CommandKind::DropIndex,
        CommandKind::GetIndexes,
        CommandKind::Drop,
        CommandKind::Rename,
        CommandKind::Insert,
        CommandKind::Upsert,
        CommandKind::Update,
        CommandKind::UpdateId,
        CommandKind::UpsertId,
        CommandKind::DeleteId,
    ];

    /// The wire tag, as it appears in the `cmd` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::CreateCollection => "createCollection",
            CommandKind::Backup => "backup",
            CommandKind::QuickCheck => "quickCheck",
            CommandKind::Find => "find",
            CommandKind::FindOne => "findOne",
            CommandKind::FindId => "findId",
            CommandKind::Count => "count",
            CommandKind::EnsureIndex => "ensureIndex",
            CommandKind::DropIndex => "dropIndex",
            CommandKind::GetIndexes => "getIndexes",
            CommandKind::Drop => "drop",
            CommandKind::Rename => "rename",
            CommandKind::Insert => "insert",
            CommandKind::Upsert => "upsert",
            CommandKind::Update => "update",
            CommandKind::UpdateId => "updateId",
            CommandKind::UpsertId => "upsertId",
            CommandKind::DeleteId => "deleteId",
        }
    }

    /// Whether the command addresses the database rather than one collection.
    pub fn is_database_level(&self) -> bool {
        matches!(
            self,
            CommandKind::CreateCollection | CommandKind::Backup | CommandKind::QuickCheck
        )
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query payload accumulated by the query builder.
///
/// Absent options are omitted from the JSON and flags are only written
/// when set, so a fresh spec serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub find: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Field names, `-` prefix for descending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<IndexHints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Value>,
    #[serde(skip_serializing_if = "is_false")]
    pub pretty: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub count: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub explain: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub delete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<Value>,
}

impl QuerySpec {
    /// Returns true if no option has been set.
    pub fn is_empty(&self) -> bool {
        *self == QuerySpec::default()
    }
}

/// Index definition used by `ensureIndex` and `dropIndex`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub unique: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub sparse: bool,
}

impl IndexSpec {
    /// Index over the given fields.
    pub fn on<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IndexSpec {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Reference to an existing index by name.
    pub fn named(name: impl Into<String>) -> Self {
        IndexSpec {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn sparse(mut self) -> Self {
        self.sparse = true;
        self
    }
}

/// A single database operation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    pub cmd: CommandKind,
    /// Backup destination, or the new name for `rename`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<QuerySpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Value>>,
}

impl Command {
    /// Creates a command with only the operation tag set.
    pub fn new(cmd: CommandKind) -> Self {
        Command {
            collection: None,
            cmd,
            path: None,
            query: None,
            index: None,
            documents: None,
        }
    }

    /// Creates a command scoped to a collection.
    pub fn for_collection(collection: impl Into<String>, cmd: CommandKind) -> Self {
        Command {
            collection: Some(collection.into()),
            ..Command::new(cmd)
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_query(mut self, query: QuerySpec) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_index(mut self, index: IndexSpec) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_documents(mut self, documents: Vec<Value>) -> Self {
        self.documents = Some(documents);
        self
    }

    /// Serializes the command as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the command as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes command text produced by the builders.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
