//! Collection builder.

use serde_json::Value;

use crate::command::{Command, CommandKind, IndexSpec};
use crate::query::Query;
use crate::result::CommandResult;
use crate::Result;

/// Per-collection command constructors.
///
/// `find` and `find_id` hand back the collection's [`Query`] for further
/// chaining; every other operation is finalized immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    name: String,
    query: Query,
}

impl Collection {
    /// Creates a handle for the named collection.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Collection {
            query: Query::new(name.clone()),
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The query accumulator, in whatever state previous calls left it.
    pub fn query(&mut self) -> &mut Query {
        &mut self.query
    }

    /// Starts (or continues) a query with the given filter.
    ///
    /// A `null` condition matches everything.
    pub fn find(&mut self, condition: Value) -> &mut Query {
        self.query.set_find(condition);
        &mut self.query
    }

    /// Looks up a single document.
    ///
    /// Any limit set earlier on the query is overridden with 1.
    pub fn find_one(&mut self, condition: Value) -> Result<CommandResult> {
        self.query.set_find(condition);
        self.query.limit(1);
        self.query.set_kind(CommandKind::FindOne);
        self.query.finish()
    }

    /// Looks up documents by id, leaving the query open for projection or
    /// pretty-printing.
    pub fn find_id<I>(&mut self, ids: I) -> &mut Query
    where
        I: IntoIterator<Item = Value>,
    {
        self.query.set_kind(CommandKind::FindId);
        self.query.set_documents(ids.into_iter().collect());
        &mut self.query
    }

    /// Counts every document in the collection.
    pub fn count(&self) -> Result<CommandResult> {
        self.finalize(self.command(CommandKind::Count))
    }

    pub fn ensure_index(&self, index: IndexSpec) -> Result<CommandResult> {
        self.finalize(self.command(CommandKind::EnsureIndex).with_index(index))
    }

    pub fn drop_index(&self, name: impl Into<String>) -> Result<CommandResult> {
        self.finalize(
            self.command(CommandKind::DropIndex)
                .with_index(IndexSpec::named(name)),
        )
    }

    pub fn get_indexes(&self) -> Result<CommandResult> {
        self.finalize(self.command(CommandKind::GetIndexes))
    }

    /// Drops the whole collection.
    pub fn drop_collection(&self) -> Result<CommandResult> {
        self.finalize(self.command(CommandKind::Drop))
    }

    /// Renames the collection; the new name travels in `path`.
    pub fn rename(&self, new_name: impl Into<String>) -> Result<CommandResult> {
        self.finalize(self.command(CommandKind::Rename).with_path(new_name))
    }

    pub fn insert<I>(&self, documents: I) -> Result<CommandResult>
    where
        I: IntoIterator<Item = Value>,
    {
        self.with_documents(CommandKind::Insert, documents)
    }

    pub fn upsert<I>(&self, documents: I) -> Result<CommandResult>
    where
        I: IntoIterator<Item = Value>,
    {
        self.with_documents(CommandKind::Upsert, documents)
    }

    /// Replaces whole documents, matched by their ids.
    pub fn update<I>(&self, documents: I) -> Result<CommandResult>
    where
        I: IntoIterator<Item = Value>,
    {
        self.with_documents(CommandKind::Update, documents)
    }

    pub fn delete_id<I>(&self, ids: I) -> Result<CommandResult>
    where
        I: IntoIterator<Item = Value>,
    {
        self.with_documents(CommandKind::DeleteId, ids)
    }

    /// Applies a modifier to the document with the given id.
    pub fn update_id(&self, id: Value, modifier: Value) -> Result<CommandResult> {
        self.with_documents(CommandKind::UpdateId, [id, modifier])
    }

    /// Applies a modifier to the document with the given id, creating it if
    /// it does not exist.
    pub fn upsert_id(&self, id: Value, modifier: Value) -> Result<CommandResult> {
        self.with_documents(CommandKind::UpsertId, [id, modifier])
    }

    fn with_documents<I>(&self, kind: CommandKind, documents: I) -> Result<CommandResult>
    where
        I: IntoIterator<Item = Value>,
    {
        self.finalize(
            self.command(kind)
                .with_documents(documents.into_iter().collect()),
        )
    }

    fn command(&self, kind: CommandKind) -> Command {
        Command::for_collection(self.name.clone(), kind)
    }

    fn finalize(&self, command: Command) -> Result<CommandResult> {
        CommandResult::from_command(&command)
    }
}
