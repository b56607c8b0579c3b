//! Database handle builder and collection registry.

use std::collections::BTreeMap;

use crate::collection::Collection;
use crate::command::{Command, CommandKind};
use crate::result::CommandResult;
use crate::{Error, Result};

/// Database-level command constructors plus the set of collections the
/// shell knows about.
#[derive(Debug, Clone, Default)]
pub struct Db {
    collections: BTreeMap<String, Collection>,
}

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_collection(&self, name: impl Into<String>) -> Result<CommandResult> {
        CommandResult::from_command(&Command::for_collection(
            name,
            CommandKind::CreateCollection,
        ))
    }

    /// Copies the database to `path`.
    pub fn backup(&self, path: impl Into<String>) -> Result<CommandResult> {
        CommandResult::from_command(&Command::new(CommandKind::Backup).with_path(path))
    }

    /// Runs a fast integrity check.
    pub fn quick_check(&self) -> Result<CommandResult> {
        CommandResult::from_command(&Command::new(CommandKind::QuickCheck))
    }

    /// Makes a collection addressable as `db.<name>`.
    ///
    /// Registering a name twice keeps the existing handle and its query
    /// state.
    pub fn register_collection(&mut self, name: impl Into<String>) -> &mut Collection {
        let name = name.into();
        tracing::debug!(collection = %name, "registering collection");
        self.collections
            .entry(name.clone())
            .or_insert_with(|| Collection::new(name))
    }

    /// Removes a collection handle. Returns false if it was not registered.
    pub fn unregister_collection(&mut self, name: &str) -> bool {
        let removed = self.collections.remove(name).is_some();
        if removed {
            tracing::debug!(collection = %name, "unregistered collection");
        } else {
            tracing::warn!(collection = %name, "unregistering unknown collection");
        }
        removed
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.collections.contains_key(name)
    }

    /// Returns the registered handle for `name`.
    pub fn collection(&mut self, name: &str) -> Result<&mut Collection> {
        self.collections
            .get_mut(name)
            .ok_or_else(|| Error::UnknownCollection(name.to_string()))
    }

    /// Registered collection names in sorted order.
    pub fn collection_names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_commands() {
        let db = Db::new();
        assert_eq!(
            db.create_collection("collName").unwrap().result(),
            r#"{"collection":"collName","cmd":"createCollection"}"#
        );
        assert_eq!(
            db.backup("backup.db").unwrap().result(),
            r#"{"cmd":"backup","path":"backup.db"}"#
        );
        assert_eq!(db.quick_check().unwrap().result(), r#"{"cmd":"quickCheck"}"#);
    }

    #[test]
    fn test_registry() {
        let mut db = Db::new();
        db.register_collection("users");
        db.register_collection("orders");
        assert_eq!(db.collection_names().collect::<Vec<_>>(), ["orders", "users"]);

        assert!(db.unregister_collection("orders"));
        assert!(!db.unregister_collection("orders"));
        assert!(matches!(
            db.collection("orders"),
            Err(Error::UnknownCollection(name)) if name == "orders"
        ));
    }

    #[test]
    fn test_reregister_keeps_query_state() {
        let mut db = Db::new();
        db.register_collection("users").find(json!({"a": 1}));
        db.register_collection("users");
        assert!(db.collection("users").unwrap().query().spec().find.is_some());
    }
}
