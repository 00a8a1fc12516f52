//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Question not found: {0}")]
    QuestionNotFound(Snowflake),

    #[error("Answer not found: {0}")]
    AnswerNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the question author can accept an answer")]
    NotQuestionAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::QuestionNotFound(_) => "UNKNOWN_QUESTION",
            Self::AnswerNotFound(_) => "UNKNOWN_ANSWER",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            Self::NotQuestionAuthor => "NOT_QUESTION_AUTHOR",

            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::QuestionNotFound(_)
                | Self::AnswerNotFound(_)
                | Self::NotificationNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::ContentTooLong { .. })
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotQuestionAuthor)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DomainError::QuestionNotFound(Snowflake::new(1)).code(),
            "UNKNOWN_QUESTION"
        );
        assert_eq!(DomainError::NotQuestionAuthor.code(), "NOT_QUESTION_AUTHOR");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::AnswerNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::ValidationError("x".into()).is_validation());
        assert!(DomainError::NotQuestionAuthor.is_authorization());
        assert!(DomainError::EmailAlreadyExists.is_conflict());
        assert!(!DomainError::StorageError("disk".into()).is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::QuestionNotFound(Snowflake::new(123));
        assert_eq!(err.to_string(), "Question not found: 123");

        let err = DomainError::ContentTooLong { max: 150 };
        assert_eq!(err.to_string(), "Content too long: max 150 characters");
    }
}
