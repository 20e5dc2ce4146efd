//! Error types for the record model

/// Errors raised while interpreting wire values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Key not known for the enumeration
    #[error("unknown {kind} key: '{key}'")]
    UnknownKey {
        /// Enumeration name
        kind: &'static str,
        /// Offending key
        key: String,
    },

    /// Record kind name not recognised
    #[error("unknown record kind: '{0}'")]
    UnknownRecordKind(String),
}

impl ModelError {
    /// Create unknown key error
    pub fn unknown_key(kind: &'static str, key: impl Into<String>) -> Self {
        Self::UnknownKey {
            kind,
            key: key.into(),
        }
    }
}
