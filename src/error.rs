use thiserror::Error;

use crate::client::DataApiError;

#[derive(Debug, Error)]
pub enum RdsDataError {
    /// Error returned by the Data API, passed through untouched.
    #[error(transparent)]
    Remote(#[from] DataApiError),

    #[error("{call}: {source}")]
    RemoteCall {
        call: &'static str,
        #[source]
        source: DataApiError,
    },

    #[error("connection did not respond: {0}")]
    Unreachable(#[source] DataApiError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unsupported usage: {0}")]
    Unsupported(String),

    #[error("Decode error: {0}")]
    DecodeError(String),
}

impl RdsDataError {
    /// The remote error underneath this one, if the failure came from the service.
    #[must_use]
    pub fn remote_cause(&self) -> Option<&DataApiError> {
        match self {
            RdsDataError::Remote(source)
            | RdsDataError::RemoteCall { source, .. }
            | RdsDataError::Unreachable(source) => Some(source),
            _ => None,
        }
    }
}
