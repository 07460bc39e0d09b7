use crate::client::{ExecuteStatementRequest, ExecuteStatementResponse};
use crate::context::CallContext;
use crate::error::RdsDataError;
use crate::results::{ExecResult, Rows};
use crate::translation::has_ordinal_placeholder;
use crate::types::NamedValue;

use super::connection::RdsConnection;
use super::params::Params;
use super::query::{build_exec_result, build_rows};
use super::transaction::TransactionId;

impl RdsConnection {
    /// Run a statement outside any transaction and return its rows.
    ///
    /// # Errors
    /// Returns `RdsDataError::Unsupported` for ordinal placeholders or unbindable
    /// parameters (nothing is sent), or `RdsDataError::RemoteCall` if the service fails.
    pub async fn query(
        &self,
        cx: &CallContext,
        sql: &str,
        params: &[NamedValue],
    ) -> Result<Rows, RdsDataError> {
        let out = self.execute_statement(cx, sql, params, None).await?;
        Ok(build_rows(out))
    }

    /// Run a write outside any transaction.
    ///
    /// # Errors
    /// Same as [`RdsConnection::query`].
    pub async fn execute(
        &self,
        cx: &CallContext,
        sql: &str,
        params: &[NamedValue],
    ) -> Result<ExecResult, RdsDataError> {
        let out = self.execute_statement(cx, sql, params, None).await?;
        Ok(build_exec_result(out))
    }

    /// Run a statement as part of the transaction `tx`.
    ///
    /// # Errors
    /// Same as [`RdsConnection::query`].
    pub async fn query_in_transaction(
        &self,
        cx: &CallContext,
        tx: &TransactionId,
        sql: &str,
        params: &[NamedValue],
    ) -> Result<Rows, RdsDataError> {
        let out = self.execute_statement(cx, sql, params, Some(tx)).await?;
        Ok(build_rows(out))
    }

    /// Run a write as part of the transaction `tx`.
    ///
    /// # Errors
    /// Same as [`RdsConnection::query`].
    pub async fn execute_in_transaction(
        &self,
        cx: &CallContext,
        tx: &TransactionId,
        sql: &str,
        params: &[NamedValue],
    ) -> Result<ExecResult, RdsDataError> {
        let out = self.execute_statement(cx, sql, params, Some(tx)).await?;
        Ok(build_exec_result(out))
    }

    /// Validate, encode and send one `ExecuteStatement` call.
    pub(crate) async fn execute_statement(
        &self,
        cx: &CallContext,
        sql: &str,
        params: &[NamedValue],
        transaction: Option<&TransactionId>,
    ) -> Result<ExecuteStatementResponse, RdsDataError> {
        if has_ordinal_placeholder(sql) {
            return Err(RdsDataError::Unsupported(
                "ordinal parameters not supported, must use named parameters".to_string(),
            ));
        }
        let parameters = Params::convert(params)?.into_inner();

        let request = ExecuteStatementRequest {
            resource_arn: self.resource_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            database: self.database.clone(),
            sql: sql.to_string(),
            parameters,
            include_result_metadata: true,
            continue_after_timeout: false,
            transaction_id: transaction.map(|tx| tx.as_str().to_string()),
        };

        tracing::debug!(
            database = ?self.database,
            params = request.parameters.len(),
            in_transaction = transaction.is_some(),
            "ExecuteStatement"
        );

        cx.run(self.api.execute_statement(&request))
            .await
            .map_err(|source| RdsDataError::RemoteCall {
                call: "ExecuteStatement",
                source,
            })
    }
}
