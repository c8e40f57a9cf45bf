use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElectionError {
    #[error("election backend: {0}")]
    Backend(String),
}

pub type ElectionResult<T> = Result<T, ElectionError>;
