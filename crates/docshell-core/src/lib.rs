//! # docshell Core
//!
//! Command descriptors, the fluent builders that produce them, and the
//! shell-line front end that drives the builders from text.
//!
//! ```rust
//! use docshell_core::Db;
//! use serde_json::json;
//!
//! # fn main() -> docshell_core::Result<()> {
//! let mut db = Db::new();
//! let users = db.register_collection("users");
//!
//! let count = users.find(json!({"age": 30})).limit(5).count()?;
//! assert_eq!(
//!     count.result(),
//!     r#"{"collection":"users","cmd":"find","query":{"find":{"age":30},"limit":5,"count":true}}"#
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

#[allow(missing_docs)]
pub mod collection;
#[allow(missing_docs)]
pub mod command;
#[allow(missing_docs)]
pub mod db;
pub mod error;
pub mod query;
#[allow(missing_docs)]
pub mod result;
pub mod script;

pub use collection::Collection;
pub use command::{Command, CommandKind, IndexHints, IndexSpec, QuerySpec};
pub use db::Db;
pub use error::{Error, Result};
pub use query::Query;
pub use result::CommandResult;
