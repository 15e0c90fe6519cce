use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum FeedServiceError {
    #[error("entry already recorded for this feed")]
    DuplicateEntry,
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for FeedServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::DuplicateEntry => FeedServiceError::DuplicateEntry,
            _ => FeedServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<FeedServiceError> for AppError {
    fn from(err: FeedServiceError) -> Self {
        match err {
            FeedServiceError::DuplicateEntry => AppError::DuplicateEntry,
            FeedServiceError::Dependency(msg) => AppError::Internal(msg),
            FeedServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
