//! Shell configuration

/// Default upper bound on a single shell line (1 MB)
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Shell configuration options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Collections registered when the shell is created
    pub collections: Vec<String>,
    /// Lines longer than this are rejected before parsing
    pub max_line_length: usize,
    /// Whether [`Shell::evaluate`](crate::Shell::evaluate) indents its output
    pub pretty_output: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            collections: Vec::new(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            pretty_output: false,
        }
    }
}

impl ShellConfig {
    /// Register these collections on startup
    pub fn with_collections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collections = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the line length limit
    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    /// Indent evaluated command text
    pub fn with_pretty_output(mut self, pretty: bool) -> Self {
        self.pretty_output = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_config_defaults() {
        let config = ShellConfig::default();
        assert!(config.collections.is_empty());
        assert_eq!(config.max_line_length, DEFAULT_MAX_LINE_LENGTH);
        assert!(!config.pretty_output);
    }

    #[test]
    fn test_shell_config_builders() {
        let config = ShellConfig::default()
            .with_collections(["users", "orders"])
            .with_max_line_length(128)
            .with_pretty_output(true);
        assert_eq!(config.collections, vec!["users", "orders"]);
        assert_eq!(config.max_line_length, 128);
        assert!(config.pretty_output);
    }
}
