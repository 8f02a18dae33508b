use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Scheduling conflict: {0}")]
    Conflict(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl SchedulingError {
    /// The message without the category prefix, suitable for showing to a user.
    pub fn user_message(&self) -> String {
        match self {
            SchedulingError::NotFound(msg)
            | SchedulingError::Validation(msg)
            | SchedulingError::Conflict(msg) => msg.clone(),
            SchedulingError::Persistence(_) | SchedulingError::Internal(_) => {
                "Internal Server Error".to_string()
            }
        }
    }

    /// Whether the error came from the storage layer or the server itself
    /// rather than from the request.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            SchedulingError::Persistence(_) | SchedulingError::Internal(_)
        )
    }
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
