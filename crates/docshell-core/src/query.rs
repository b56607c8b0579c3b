//! Query builder.
//!
//! A [`Query`] belongs to a [`Collection`](crate::Collection) and
//! accumulates options across chained calls. Terminal calls serialize the
//! accumulated state and reset the builder, so a later chain on the same
//! collection never sees options from an earlier one.

use std::mem;

use serde_json::Value;

use crate::command::{Command, CommandKind, IndexHints, QuerySpec};
use crate::result::CommandResult;
use crate::Result;

/// Mutable query accumulator for one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: String,
    kind: CommandKind,
    spec: QuerySpec,
    documents: Option<Vec<Value>>,
}

impl Query {
    pub(crate) fn new(collection: impl Into<String>) -> Self {
        Query {
            collection: collection.into(),
            kind: CommandKind::Find,
            spec: QuerySpec::default(),
            documents: None,
        }
    }

    /// Name of the owning collection.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Operation tag the next terminal call will emit.
    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Options accumulated so far.
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// Ids attached by `findId`, if any.
    pub fn documents(&self) -> Option<&[Value]> {
        self.documents.as_deref()
    }

    /// Caps the number of returned documents.
    pub fn limit(&mut self, limit: u64) -> &mut Self {
        tracing::trace!(collection = %self.collection, limit, "query limit");
        self.spec.limit = Some(limit);
        self
    }

    /// Skips the first `offset` matches.
    pub fn offset(&mut self, offset: u64) -> &mut Self {
        tracing::trace!(collection = %self.collection, offset, "query offset");
        self.spec.offset = Some(offset);
        self
    }

    /// Sets the sort order, replacing any previous one.
    ///
    /// Fields prefixed with `-` sort descending.
    pub fn sort<I, S>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        tracing::trace!(collection = %self.collection, ?fields, "query sort");
        self.spec.sort = Some(fields);
        self
    }

    /// Suggests indexes to the planner.
    pub fn hint(&mut self, hints: IndexHints) -> &mut Self {
        self.spec.hint = Some(hints);
        self
    }

    /// Restricts the fields returned.
    pub fn project(&mut self, projection: Value) -> &mut Self {
        self.spec.project = Some(projection);
        self
    }

    /// Asks for indented output.
    pub fn pretty(&mut self) -> &mut Self {
        self.spec.pretty = true;
        self
    }

    /// Finalizes the chain as a count of matching documents.
    pub fn count(&mut self) -> Result<CommandResult> {
        self.spec.count = true;
        self.finish()
    }

    /// Finalizes the chain as a request for the query plan.
    pub fn explain(&mut self) -> Result<CommandResult> {
        self.spec.explain = true;
        self.finish()
    }

    /// Finalizes the chain as a delete of the matching documents.
    pub fn delete(&mut self) -> Result<CommandResult> {
        self.spec.delete = true;
        self.finish()
    }

    /// Finalizes the chain as an update of the matching documents.
    ///
    /// A `null` modifier is sent as `{}`.
    pub fn update(&mut self, modifier: Value) -> Result<CommandResult> {
        self.spec.update = Some(or_empty_object(modifier));
        self.finish()
    }

    /// Finalizes the chain as a plain retrieval and returns the JSON text.
    pub fn result(&mut self) -> Result<String> {
        self.finish().map(CommandResult::into_string)
    }

    /// Discards the accumulated state without emitting a command.
    pub fn reset(&mut self) {
        tracing::trace!(collection = %self.collection, "query reset");
        self.take();
    }

    pub(crate) fn set_find(&mut self, condition: Value) {
        self.spec.find = Some(or_empty_object(condition));
    }

    pub(crate) fn set_kind(&mut self, kind: CommandKind) {
        self.kind = kind;
    }

    pub(crate) fn set_documents(&mut self, documents: Vec<Value>) {
        self.documents = Some(documents);
    }

    /// Serializes the accumulated state and resets the builder.
    ///
    /// The state is taken before serializing, so the reset holds even when
    /// serialization fails.
    pub(crate) fn finish(&mut self) -> Result<CommandResult> {
        let command = self.take();
        CommandResult::from_command(&command)
    }

    fn take(&mut self) -> Command {
        let mut command = Command::for_collection(self.collection.clone(), self.kind)
            .with_query(mem::take(&mut self.spec));
        command.documents = self.documents.take();
        self.kind = CommandKind::Find;
        command
    }
}

pub(crate) fn or_empty_object(value: Value) -> Value {
    if value.is_null() {
        Value::Object(Default::default())
    } else {
        value
    }
}
