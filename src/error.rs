use thiserror::Error;

/// Errors raised by the stream-processing core.
///
/// Configuration problems are reported when a component is built, data
/// problems at the call that discovers them. Neither is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid data: {0}")]
    Data(String),

    #[error("{0} is not initialized")]
    Uninitialized(&'static str),

    #[error("{0} must be fitted before use")]
    NotFitted(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn config<M: Into<String>>(message: M) -> Self {
        Error::Config(message.into())
    }

    pub fn data<M: Into<String>>(message: M) -> Self {
        Error::Data(message.into())
    }
}
