use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::DataApiError;

/// Per-call deadline and cancellation, forwarded into every remote call.
///
/// ```rust
/// use std::time::Duration;
/// use rds_data_middleware::prelude::*;
///
/// let cx = CallContext::background().with_timeout(Duration::from_secs(5));
/// # let _ = cx;
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
}

impl CallContext {
    /// No deadline, not cancellable.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Drive one remote call under this context. Nothing is retried.
    pub(crate) async fn run<F, T>(&self, call: F) -> Result<T, DataApiError>
    where
        F: Future<Output = Result<T, DataApiError>>,
    {
        let guarded = async {
            match &self.cancel {
                Some(token) => tokio::select! {
                    biased;
                    () = token.cancelled() => Err(DataApiError::Cancelled),
                    res = call => res,
                },
                None => call.await,
            }
        };

        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, guarded)
                .await
                .unwrap_or(Err(DataApiError::DeadlineExceeded(limit))),
            None => guarded.await,
        }
    }
}
