//! Error types for AutoPay
//!
//! Every failure is a user-input failure: validation problems and lookups of
//! records that do not exist. Each variant maps to the title of the notice
//! shown to the user.

use thiserror::Error;

/// Result type for AutoPay operations
pub type Result<T> = std::result::Result<T, AutopayError>;

/// AutoPay error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutopayError {
    /// One or more required form fields are empty
    #[error("Please fill in all required fields (missing: {})", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// A simulation names the same agent on both sides
    #[error("Sender and recipient agents must be different")]
    SameSenderRecipient,

    /// A field is present but does not parse
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    /// Agent not found
    #[error("Agent {agent_id} not found")]
    AgentNotFound { agent_id: String },

    /// Generated id already registered
    #[error("Agent {agent_id} is already registered")]
    DuplicateAgent { agent_id: String },

    /// A deferred operation is already in flight
    #[error("{operation} is already in progress")]
    Busy { operation: &'static str },
}

impl AutopayError {
    /// Create an invalid input error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an agent-not-found error
    pub fn agent_not_found(agent_id: impl Into<String>) -> Self {
        Self::AgentNotFound {
            agent_id: agent_id.into(),
        }
    }

    /// True for failures caused by the shape of the submitted form
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingFields { .. } | Self::SameSenderRecipient | Self::InvalidInput { .. }
        )
    }

    /// Get an error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFields { .. } => "MISSING_FIELDS",
            Self::SameSenderRecipient => "SAME_SENDER_RECIPIENT",
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::AgentNotFound { .. } => "AGENT_NOT_FOUND",
            Self::DuplicateAgent { .. } => "DUPLICATE_AGENT",
            Self::Busy { .. } => "BUSY",
        }
    }

    /// Title of the user-visible notice for this error
    pub fn notice_title(&self) -> &'static str {
        match self {
            Self::MissingFields { .. } | Self::InvalidInput { .. } => "Validation Error",
            Self::SameSenderRecipient => "Invalid Configuration",
            Self::AgentNotFound { .. } => "Not Found",
            Self::DuplicateAgent { .. } => "Registration Failed",
            Self::Busy { .. } => "Busy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AutopayError::agent_not_found("agent-999");
        assert_eq!(err.error_code(), "AGENT_NOT_FOUND");
        assert_eq!(err.to_string(), "Agent agent-999 not found");
    }

    #[test]
    fn test_missing_fields_message_lists_fields() {
        let err = AutopayError::MissingFields {
            fields: vec!["name", "wallet address"],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields (missing: name, wallet address)"
        );
        assert_eq!(err.notice_title(), "Validation Error");
    }

    #[test]
    fn test_validation_classification() {
        assert!(AutopayError::SameSenderRecipient.is_validation());
        assert_eq!(
            AutopayError::SameSenderRecipient.notice_title(),
            "Invalid Configuration"
        );
        assert!(!AutopayError::agent_not_found("x").is_validation());
        assert!(!AutopayError::Busy { operation: "Simulation" }.is_validation());
    }
}
