/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Entry already recorded for this feed")]
    DuplicateEntry,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
