use crate::context::CallContext;
use crate::error::RdsDataError;
use crate::results::{ExecResult, Rows};
use crate::types::NamedValue;

use super::connection::RdsConnection;
use super::query::{build_exec_result, build_rows};
use super::transaction::TransactionId;

/// SQL text bound to a connection (and optionally a transaction), executed on demand.
///
/// Preparing holds no server-side resource: each `query`/`execute` sends the full text
/// again. Statements are cheap to clone and many may share one connection.
#[derive(Debug, Clone)]
pub struct Statement<'conn> {
    conn: &'conn RdsConnection,
    sql: String,
    transaction: Option<TransactionId>,
}

impl<'conn> Statement<'conn> {
    pub(crate) fn new(
        conn: &'conn RdsConnection,
        sql: String,
        transaction: Option<TransactionId>,
    ) -> Self {
        Self {
            conn,
            sql,
            transaction,
        }
    }

    /// Access the raw SQL string of the prepared statement.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The transaction this statement runs in, if it was prepared from one.
    #[must_use]
    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction.as_ref()
    }

    /// Execute the statement as a query.
    ///
    /// # Errors
    /// Same as [`RdsConnection::query`].
    pub async fn query(
        &self,
        cx: &CallContext,
        params: &[NamedValue],
    ) -> Result<Rows, RdsDataError> {
        let out = self
            .conn
            .execute_statement(cx, &self.sql, params, self.transaction.as_ref())
            .await?;
        Ok(build_rows(out))
    }

    /// Execute the statement as a write.
    ///
    /// # Errors
    /// Same as [`RdsConnection::query`].
    pub async fn execute(
        &self,
        cx: &CallContext,
        params: &[NamedValue],
    ) -> Result<ExecResult, RdsDataError> {
        let out = self
            .conn
            .execute_statement(cx, &self.sql, params, self.transaction.as_ref())
            .await?;
        Ok(build_exec_result(out))
    }
}
