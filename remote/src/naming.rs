use crate::errors::{RemoteError, Result};

const MAX_IDENTIFIER_LENGTH: usize = 32;

/// Bus identifiers (strategy names, domains) are C-style: a letter or
/// underscore followed by letters, digits or underscores, at most 32
/// characters.
pub fn is_valid_identifier(identifier: &str) -> bool {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    identifier.len() <= MAX_IDENTIFIER_LENGTH
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

pub fn check_identifier(identifier: &str, what: &str) -> Result<()> {
    if !is_valid_identifier(identifier) {
        return Err(RemoteError::invalid_argument(format!(
            "'{}' is not a valid identifier for {}",
            identifier, what
        )));
    }
    Ok(())
}
