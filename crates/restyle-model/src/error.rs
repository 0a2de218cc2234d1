use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestyleError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("mapping validation failed: {0} error(s)")]
    InvalidMapping(usize),
    #[error("generated output failed validation: {0} error(s)")]
    InvalidOutput(usize),
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, RestyleError>;
