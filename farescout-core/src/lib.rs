pub mod fallback;
pub mod location;
pub mod orchestrator;
pub mod pii;
pub mod provider;
pub mod search;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
