use thiserror::Error;

pub type SitepassResult<T> = Result<T, SitepassError>;

#[derive(Debug, Error)]
pub enum SitepassError {
    #[error("config error: {0}")]
    Config(String),

    #[error("unknown security level: {0:?} (expected low, medium, high, overkill, or crazy)")]
    UnknownLevel(String),

    #[error("credential store error: {0}")]
    Store(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
