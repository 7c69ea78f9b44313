use biodex_core::error::CoreError;
use biodex_core::store::StoreError;

/// Application-level error type for command handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures. Startup failures are reported by `main` before any command runs.
/// [`AppError::code`] and [`AppError::public_message`] give the console a
/// stable classification and a sanitized message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Core(core) => match core {
                CoreError::Validation(_) => "VALIDATION_ERROR",
                CoreError::Unauthorized(_) => "UNAUTHORIZED",
                CoreError::Forbidden(_) => "FORBIDDEN",
            },
            AppError::Store(StoreError::NotFound { .. }) => "NOT_FOUND",
            AppError::Token(_) => "UNAUTHORIZED",
            AppError::Store(StoreError::Backend(_)) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to print to the user. Infrastructure detail is logged
    /// instead.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Core(core) => core.to_string(),
            AppError::Store(StoreError::NotFound { table, id }) => {
                format!("No {table} record with id {id}")
            }
            AppError::Token(err) => format!("Invalid token: {err}"),
            AppError::Store(StoreError::Backend(_)) => {
                tracing::error!(error = %self, "Storage error");
                "An internal error occurred".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record_is_not_found() {
        let err = AppError::from(StoreError::NotFound {
            table: "species",
            id: "9".into(),
        });
        assert_eq!(err.code(), "NOT_FOUND");
        assert_eq!(err.public_message(), "No species record with id 9");
    }

    #[test]
    fn test_backend_detail_is_not_shown() {
        let err = AppError::from(StoreError::Backend("password authentication failed".into()));
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(err.public_message(), "An internal error occurred");
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = AppError::from(CoreError::Validation("Invalid kingdom 'x'".into()));
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.public_message().contains("Invalid kingdom 'x'"));
    }

    #[test]
    fn test_wrong_account_is_forbidden() {
        let err = AppError::from(CoreError::Forbidden("Login to the correct account".into()));
        assert_eq!(err.code(), "FORBIDDEN");
        assert_eq!(err.public_message(), "Forbidden: Login to the correct account");
    }

    #[test]
    fn test_token_error_is_unauthorized() {
        let err = AppError::from(jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::InvalidToken,
        ));
        assert_eq!(err.code(), "UNAUTHORIZED");
        assert!(err.public_message().starts_with("Invalid token"));
    }
}
