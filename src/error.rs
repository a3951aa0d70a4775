use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;
use crate::snapshot::SnapshotError;

/// Failures surfaced to the user as a one-shot notice.
///
/// None of these are retried automatically; the screen that triggered the
/// operation keeps its state so the user can try again.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not reach the server: {0}")]
    Network(String),

    #[error("The server rejected the request (status {0})")]
    Rejected(u16),

    #[error("The server sent an unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Could not create the picture: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("No permission to save into {}", path.display())]
    Permission { path: PathBuf },

    #[error("Export failed: {0}")]
    Export(String),
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(message) => AppError::Network(message),
            ApiError::Status(status) => AppError::Rejected(status),
            ApiError::Decode(message) => AppError::InvalidResponse(message),
        }
    }
}

impl AppError {
    pub fn is_permission(&self) -> bool {
        matches!(self, AppError::Permission { .. })
    }
}

pub type AppResult<T> = Result<T, AppError>;
