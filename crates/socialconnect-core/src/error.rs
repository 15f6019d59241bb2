use thiserror::Error;

/// Failures surfaced by the session and feed stores. Every variant means the
/// operation was rejected and no state changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A required field was empty (login, signup, post body)
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation that needs an active viewer was attempted while signed out
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The credential verifier refused the identifier/secret pair
    #[error("authentication failed: {0}")]
    AuthFailure(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
