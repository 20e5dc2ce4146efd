//! Error types for the form layer
//!
//! Two families:
//! - [`GatewayError`]: a write that reached (or tried to reach) the backend failed
//! - [`FormError`]: the modal was driven through an operation its state forbids

use crate::modal::{ModalMode, ModalState};

/// HTTP status the backend uses for conflicting records
pub const CONFLICT_STATUS: u16 = 409;

/// Failure of a persistence gateway call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// Record conflicts with an existing one (HTTP 409)
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Any other non-success response
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Request never produced a response
    #[error("transport error: {0}")]
    Transport(String),

    /// Response could not be interpreted
    #[error("invalid response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Classify a non-success status
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == CONFLICT_STATUS {
            Self::Conflict { message }
        } else {
            Self::Rejected { status, message }
        }
    }

    /// Whether this is the conflict class
    #[inline]
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// HTTP status, if a response was received
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Conflict { .. } => Some(CONFLICT_STATUS),
            Self::Rejected { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Server-provided (or locally produced) message text
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Conflict { message } | Self::Rejected { message, .. } => message,
            Self::Transport(message) | Self::Decode(message) => message,
        }
    }
}

/// Misuse of the modal orchestrator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Transition not allowed from the current state
    #[error("illegal modal transition: {from:?} -> {to:?}")]
    IllegalTransition { from: ModalState, to: ModalState },

    /// Mode not offered for this record kind
    #[error("{mode:?} mode not supported for {kind}")]
    UnsupportedMode {
        mode: ModalMode,
        kind: puris_model::RecordKind,
    },

    /// Edit and react modes need an existing record
    #[error("{0:?} mode requires a target record")]
    MissingTarget(ModalMode),

    /// Draft operations need an open modal
    #[error("modal is not editing (state {0:?})")]
    NotEditing(ModalState),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_409_is_conflict() {
        let err = GatewayError::from_status(409, "Delivery already exists. Use PUT instead.");
        assert!(err.is_conflict());
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn other_status_is_rejected() {
        let err = GatewayError::from_status(400, "Delivery is invalid.");
        assert!(!err.is_conflict());
        assert_eq!(err.message(), "Delivery is invalid.");
        assert!(err.to_string().contains("status 400"));
    }

    #[test]
    fn transport_has_no_status() {
        let err = GatewayError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_conflict());
    }

    #[test]
    fn illegal_transition_display() {
        let err = FormError::IllegalTransition {
            from: ModalState::Closed,
            to: ModalState::Submitting(ModalMode::Create),
        };
        assert!(err.to_string().contains("illegal modal transition"));
    }
}
