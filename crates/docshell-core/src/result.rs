//! Finalized command text.

use std::fmt;

use crate::command::Command;
use crate::Result;

/// The outcome of a terminal builder call.
///
/// Holds the JSON computed when the chain was finalized; nothing can
/// change it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    json: String,
}

impl CommandResult {
    pub(crate) fn from_command(command: &Command) -> Result<Self> {
        let json = command.to_json()?;
        tracing::debug!(cmd = %command.cmd, collection = ?command.collection, "command finalized");
        Ok(CommandResult { json })
    }

    /// Returns the serialized command descriptor.
    pub fn result(&self) -> &str {
        &self.json
    }

    /// Decodes the stored text back into a typed command.
    pub fn command(&self) -> Result<Command> {
        Command::from_json(&self.json)
    }

    pub fn into_string(self) -> String {
        self.json
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.json)
    }
}

impl From<CommandResult> for String {
    fn from(result: CommandResult) -> Self {
        result.json
    }
}
