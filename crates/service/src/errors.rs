use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn storage(err: impl std::fmt::Display) -> Self { Self::Storage(err.to_string()) }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(err: models::errors::ModelError) -> Self {
        match err {
            models::errors::ModelError::Validation(msg) => Self::Validation(msg),
            models::errors::ModelError::Decode(msg) => Self::Storage(msg),
        }
    }
}
