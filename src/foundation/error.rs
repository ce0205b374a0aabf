use crate::foundation::core::EntityKind;

/// Result alias used across the engine.
pub type CompResult<T> = Result<T, CompError>;

/// Errors reported by engine operations.
///
/// None of these leave the registries in a partially-mutated state: the change journal is
/// rolled back before the error reaches the caller.
#[derive(thiserror::Error, Debug)]
pub enum CompError {
    /// An id did not resolve to a live entity.
    #[error("not found: {kind} '{id}'")]
    NotFound {
        /// Kind of entity that was looked up.
        kind: EntityKind,
        /// The unresolved id.
        id: String,
    },

    /// The destination of a structural operation does not exist or cannot accept the entity.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Arguments were rejected before any mutation happened.
    #[error("validation error: {0}")]
    Validation(String),

    /// A parent/child relation request would break the composition tree.
    #[error("nesting error: {0}")]
    Nesting(String),

    /// An export tree could not be imported.
    #[error("import error: {0}")]
    Import(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CompError {
    /// Build a [`CompError::NotFound`] for `id`.
    pub fn not_found(kind: EntityKind, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Build a [`CompError::InvalidTarget`].
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }

    /// Build a [`CompError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CompError::Nesting`].
    pub fn nesting(msg: impl Into<String>) -> Self {
        Self::Nesting(msg.into())
    }

    /// Build a [`CompError::Import`].
    pub fn import(msg: impl Into<String>) -> Self {
        Self::Import(msg.into())
    }

    /// Build a [`CompError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for the "nothing happened because the id is unknown" class.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for CompError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
