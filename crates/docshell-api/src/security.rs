//! Input validation for shell lines and names
//!
//! Everything here runs before a line reaches the parser, so oversized or
//! malformed input is rejected without allocating a token stream for it.

use docshell_core::error::{Error, Result};

/// Longest accepted collection name
pub const MAX_COLLECTION_NAME_LENGTH: usize = 256;

/// Validates a shell line
///
/// # Errors
///
/// Returns Error::InvalidInput for lines longer than `max_length` bytes or
/// containing null bytes
#[inline]
pub fn validate_line(line: &str, max_length: usize) -> Result<()> {
    if line.len() > max_length {
        return Err(Error::InvalidInput(format!(
            "Line length {} exceeds maximum {}",
            line.len(),
            max_length
        )));
    }

    if line.contains('\0') {
        return Err(Error::InvalidInput(
            "Line cannot contain null bytes".to_string(),
        ));
    }

    Ok(())
}

/// Validates a collection name before registration
///
/// # Errors
///
/// Returns Error::InvalidInput for empty or oversized names and names with
/// null bytes
#[inline]
pub fn validate_collection_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidInput(
            "Collection name cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_COLLECTION_NAME_LENGTH {
        return Err(Error::InvalidInput(format!(
            "Collection name length {} exceeds maximum {}",
            name.len(),
            MAX_COLLECTION_NAME_LENGTH
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidInput(
            "Collection name cannot contain null bytes".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_line() {
        // Valid
        assert!(validate_line("db.users.find()", 64).is_ok());

        // Too long
        let long = "a".repeat(65);
        assert!(validate_line(&long, 64).is_err());

        // Null byte
        assert!(validate_line("db.users\0.find()", 64).is_err());
    }

    #[test]
    fn test_validate_collection_name() {
        // Valid
        assert!(validate_collection_name("users").is_ok());
        assert!(validate_collection_name("my coll").is_ok());

        // Empty
        assert!(validate_collection_name("").is_err());

        // Too long
        let long = "c".repeat(MAX_COLLECTION_NAME_LENGTH + 1);
        assert!(validate_collection_name(&long).is_err());
    }
}
