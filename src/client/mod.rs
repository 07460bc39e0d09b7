//! Boundary to the remote Data API.
//!
//! Every call is a self-contained RPC: the request carries the resource and secret ARNs,
//! the SQL text, its parameters, and (for transactional work) the transaction id. There
//! is no session to open or close, so the trait only has the four calls the adapter
//! needs.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[cfg(feature = "http")]
mod http;
pub mod messages;

#[cfg(feature = "http")]
pub use http::HttpDataApi;
pub use messages::{
    ArrayValue, BeginTransactionRequest, BeginTransactionResponse, ColumnMetadata,
    CommitTransactionRequest, CommitTransactionResponse, ExecuteStatementRequest,
    ExecuteStatementResponse, Field, RollbackTransactionRequest, RollbackTransactionResponse,
    SqlParameter,
};

/// Errors reported by a [`DataApi`] implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataApiError {
    /// The service rejected the call (bad SQL, unknown transaction, auth failure, ...).
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("call cancelled")]
    Cancelled,
}

/// The RPC surface consumed from the remote execution service.
#[async_trait]
pub trait DataApi: Send + Sync {
    /// Start a transaction; the returned id must be threaded through later calls.
    ///
    /// # Errors
    ///
    /// Returns `DataApiError` if the service rejects the call or cannot be reached.
    async fn begin_transaction(
        &self,
        input: &BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse, DataApiError>;

    /// Run one SQL statement.
    ///
    /// # Errors
    ///
    /// Returns `DataApiError` if the service rejects the call or cannot be reached.
    async fn execute_statement(
        &self,
        input: &ExecuteStatementRequest,
    ) -> Result<ExecuteStatementResponse, DataApiError>;

    /// Commit the transaction named by `input.transaction_id`.
    ///
    /// # Errors
    ///
    /// Returns `DataApiError` if the service rejects the call or cannot be reached.
    async fn commit_transaction(
        &self,
        input: &CommitTransactionRequest,
    ) -> Result<CommitTransactionResponse, DataApiError>;

    /// Roll back the transaction named by `input.transaction_id`.
    ///
    /// # Errors
    ///
    /// Returns `DataApiError` if the service rejects the call or cannot be reached.
    async fn rollback_transaction(
        &self,
        input: &RollbackTransactionRequest,
    ) -> Result<RollbackTransactionResponse, DataApiError>;
}
