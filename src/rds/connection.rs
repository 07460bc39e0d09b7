use std::fmt;
use std::sync::Arc;

use crate::client::{DataApi, ExecuteStatementRequest};
use crate::config::RdsConfig;
use crate::context::CallContext;
use crate::error::RdsDataError;
use crate::results::ExecResult;
use crate::types::RowValues;

use super::prepared::Statement;

const PING_SQL: &str = "/* ping */ SELECT 1";

/// A logical connection to one database behind the Data API.
///
/// There is no server-side session: every call re-sends the resource/secret ARNs and
/// database name. All fields are fixed at construction, so a connection can be shared
/// between tasks (`&self` everywhere) for independent statements.
pub struct RdsConnection {
    pub(crate) api: Arc<dyn DataApi>,
    pub(crate) database: Option<String>,
    pub(crate) resource_arn: String,
    pub(crate) secret_arn: String,
}

// Manual Debug implementation because the service handle does not expose `Debug`
impl fmt::Debug for RdsConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RdsConnection")
            .field("api", &"<DataApi>")
            .field("database", &self.database)
            .field("resource_arn", &self.resource_arn)
            .field("secret_arn", &self.secret_arn)
            .finish()
    }
}

impl RdsConnection {
    /// Build a connection from an identity and a service handle.
    ///
    /// # Errors
    /// Returns `RdsDataError::ConfigError` if the resource or secret ARN is empty.
    pub fn new(config: &RdsConfig, api: Arc<dyn DataApi>) -> Result<Self, RdsDataError> {
        config.validate()?;
        Ok(Self {
            api,
            database: config.database.clone(),
            resource_arn: config.resource_arn.clone(),
            secret_arn: config.secret_arn.clone(),
        })
    }

    #[must_use]
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    #[must_use]
    pub fn resource_arn(&self) -> &str {
        &self.resource_arn
    }

    #[must_use]
    pub fn secret_arn(&self) -> &str {
        &self.secret_arn
    }

    /// Run a no-op query to check the target is reachable.
    ///
    /// # Errors
    /// Returns `RdsDataError::Unreachable` wrapping the service error.
    pub async fn ping(&self, cx: &CallContext) -> Result<(), RdsDataError> {
        let request = ExecuteStatementRequest {
            resource_arn: self.resource_arn.clone(),
            secret_arn: self.secret_arn.clone(),
            database: self.database.clone(),
            sql: PING_SQL.to_string(),
            parameters: Vec::new(),
            include_result_metadata: false,
            continue_after_timeout: false,
            transaction_id: None,
        };
        tracing::debug!(database = ?self.database, "ping");
        cx.run(self.api.execute_statement(&request))
            .await
            .map(|_| ())
            .map_err(RdsDataError::Unreachable)
    }

    /// Bind `sql` to this connection for later execution. No remote call is made.
    #[must_use]
    pub fn prepare(&self, sql: impl Into<String>) -> Statement<'_> {
        Statement::new(self, sql.into(), None)
    }

    /// Release the service handle. There is no remote session to tear down.
    pub fn close(self) {
        tracing::debug!(database = ?self.database, "closing connection");
    }

    /// Positional, context-free execution.
    ///
    /// # Errors
    /// Always returns `RdsDataError::Unsupported`.
    #[deprecated(note = "use `RdsConnection::execute` with a `CallContext` and named parameters")]
    pub fn exec_without_context(
        &self,
        _sql: &str,
        _args: &[RowValues],
    ) -> Result<ExecResult, RdsDataError> {
        Err(RdsDataError::Unsupported(
            "deprecated: use execute".to_string(),
        ))
    }

    /// Context-free prepare.
    ///
    /// # Errors
    /// Always returns `RdsDataError::Unsupported`.
    #[deprecated(note = "use `RdsConnection::prepare`")]
    pub fn prepare_without_context(&self, _sql: &str) -> Result<Statement<'_>, RdsDataError> {
        Err(RdsDataError::Unsupported(
            "deprecated: use prepare".to_string(),
        ))
    }
}
