#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} cannot be blank")]
    BlankField(&'static str),
    #[error("Store backend cannot be blank")]
    BlankBackend,
    #[error("Unknown store backend: {0}")]
    UnknownBackend(String),
}

/// Rejects empty and whitespace-only values.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}
