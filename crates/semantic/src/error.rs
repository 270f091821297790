use thiserror::Error;

/// Errors surfaced while configuring an embedder.
///
/// Embedding itself never fails; only backend construction can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Configuration is inconsistent (e.g., an empty model label).
    #[error("invalid semantic config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_config() {
        let err = SemanticError::InvalidConfig("model_name must not be empty".into());
        assert!(err.to_string().contains("invalid semantic config"));
        assert!(err.to_string().contains("model_name"));
    }

    #[test]
    fn error_debug_formatting() {
        let err = SemanticError::InvalidConfig("x".into());
        assert!(format!("{err:?}").contains("InvalidConfig"));
    }
}
