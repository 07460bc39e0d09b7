use std::fmt;

use crate::client::{BeginTransactionRequest, CommitTransactionRequest, RollbackTransactionRequest};
use crate::context::CallContext;
use crate::error::RdsDataError;
use crate::results::{ExecResult, Rows};
use crate::tx_outcome::TxOutcome;
use crate::types::NamedValue;

use super::connection::RdsConnection;
use super::prepared::Statement;

/// Opaque id of a remote transaction; the only transactional state this crate holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TransactionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An active remote transaction.
///
/// Statements run through this handle carry its id; statements run directly on the
/// connection do not. `commit` and `rollback` consume the handle, so a finished
/// transaction cannot be used again. Dropping it without either leaves the remote
/// transaction to expire server-side.
#[derive(Debug)]
pub struct Transaction<'conn> {
    conn: &'conn RdsConnection,
    id: TransactionId,
}

impl RdsConnection {
    /// Begin a remote transaction.
    ///
    /// # Errors
    /// Returns the service error unchanged (`RdsDataError::Remote`).
    pub async fn begin(&self, cx: &CallContext) -> Result<Transaction<'_>, RdsDataError> {
        let request = BeginTransactionRequest {
            resource_arn: self.resource_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            database: self.database.clone(),
        };
        let out = cx.run(self.api.begin_transaction(&request)).await?;
        tracing::debug!(transaction_id = %out.transaction_id, "began transaction");
        Ok(Transaction {
            conn: self,
            id: TransactionId(out.transaction_id),
        })
    }

    /// Commit the transaction identified by `tx`.
    ///
    /// # Errors
    /// Returns the service error unchanged (`RdsDataError::Remote`).
    pub async fn commit_transaction(
        &self,
        cx: &CallContext,
        tx: &TransactionId,
    ) -> Result<TxOutcome, RdsDataError> {
        let request = CommitTransactionRequest {
            resource_arn: self.resource_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            transaction_id: tx.as_str().to_string(),
        };
        let out = cx.run(self.api.commit_transaction(&request)).await?;
        tracing::debug!(transaction_id = %tx, status = %out.transaction_status, "commit");
        Ok(TxOutcome::new(out.transaction_status))
    }

    /// Roll back the transaction identified by `tx`.
    ///
    /// # Errors
    /// Returns the service error unchanged (`RdsDataError::Remote`).
    pub async fn rollback_transaction(
        &self,
        cx: &CallContext,
        tx: &TransactionId,
    ) -> Result<TxOutcome, RdsDataError> {
        let request = RollbackTransactionRequest {
            resource_arn: self.resource_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            transaction_id: tx.as_str().to_string(),
        };
        let out = cx.run(self.api.rollback_transaction(&request)).await?;
        tracing::debug!(transaction_id = %tx, status = %out.transaction_status, "rollback");
        Ok(TxOutcome::new(out.transaction_status))
    }
}

impl<'conn> Transaction<'conn> {
    #[must_use]
    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    #[must_use]
    pub fn connection(&self) -> &'conn RdsConnection {
        self.conn
    }

    /// Bind `sql` to this transaction for later execution.
    #[must_use]
    pub fn prepare(&self, sql: impl Into<String>) -> Statement<'conn> {
        Statement::new(self.conn, sql.into(), Some(self.id.clone()))
    }

    /// Run a statement inside this transaction and return its rows.
    ///
    /// # Errors
    /// Same as [`RdsConnection::query`].
    pub async fn query(
        &self,
        cx: &CallContext,
        sql: &str,
        params: &[NamedValue],
    ) -> Result<Rows, RdsDataError> {
        self.conn.query_in_transaction(cx, &self.id, sql, params).await
    }

    /// Run a write inside this transaction.
    ///
    /// # Errors
    /// Same as [`RdsConnection::query`].
    pub async fn execute(
        &self,
        cx: &CallContext,
        sql: &str,
        params: &[NamedValue],
    ) -> Result<ExecResult, RdsDataError> {
        self.conn.execute_in_transaction(cx, &self.id, sql, params).await
    }

    /// Commit the transaction.
    ///
    /// # Errors
    /// Returns the service error unchanged; nothing is retried.
    pub async fn commit(self, cx: &CallContext) -> Result<TxOutcome, RdsDataError> {
        self.conn.commit_transaction(cx, &self.id).await
    }

    /// Roll back the transaction.
    ///
    /// # Errors
    /// Returns the service error unchanged; nothing is retried.
    pub async fn rollback(self, cx: &CallContext) -> Result<TxOutcome, RdsDataError> {
        self.conn.rollback_transaction(cx, &self.id).await
    }
}
