/// Failures surfaced to callers of the user service. Each kind carries a
/// human-readable message; the HTTP adapter maps kinds to status codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Hashing, signing or persistence faults. The message is for logs only.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn unauthorized() -> Self {
        AuthError::Unauthorized("User is not authorized".to_string())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthError::Conflict(_) => "CONFLICT",
            AuthError::BadRequest(_) => "BAD_REQUEST",
            AuthError::Unauthorized(_) => "UNAUTHORIZED",
            AuthError::NotFound(_) => "NOT_FOUND",
            AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Logs `err` under `context` and wraps it as [`AuthError::Internal`].
    /// Meant for `map_err` on port errors that callers cannot act on.
    pub fn internal<E: std::fmt::Display>(context: &'static str) -> impl FnOnce(E) -> AuthError {
        move |err| {
            tracing::error!(error = %err, "{}", context);
            AuthError::Internal(format!("{context}: {err}"))
        }
    }
}
