//! Entry points that turn a serialized identity into a connection.
//!
//! There is no process-wide registry; pick the constructor that fits:
//!
//! | Function | When to use |
//! |---|---|
//! | [`open`] | JSON identity + your own [`DataApi`] |
//! | [`open_http`] | JSON identity, regional HTTPS endpoint (feature `http`) |
//! | [`connect`] | identity + [`DataApi`], verified with a ping |
//! | [`connect_from_env`] | `RDS_RESOURCE_ARN` / `RDS_SECRET_ARN` / `RDS_DATABASE` |

use std::sync::Arc;

use crate::client::DataApi;
use crate::config::RdsConfig;
use crate::context::CallContext;
use crate::error::RdsDataError;
use crate::rds::RdsConnection;

/// Name this adapter goes by in connection strings and logs.
pub const DRIVER_NAME: &str = "rds";

/// Open a connection from the JSON form of [`RdsConfig`].
///
/// No network traffic happens here.
///
/// # Errors
/// Returns `RdsDataError::ConfigError` if `dsn` is not a valid identity.
pub fn open(dsn: &str, api: Arc<dyn DataApi>) -> Result<RdsConnection, RdsDataError> {
    let config = RdsConfig::from_json_str(dsn)?;
    RdsConnection::new(&config, api)
}

/// Open a connection that talks HTTPS to the identity's regional endpoint.
///
/// # Errors
/// Returns `RdsDataError::ConfigError` if `dsn` is invalid or its resource ARN carries
/// no region.
#[cfg(feature = "http")]
pub fn open_http(dsn: &str) -> Result<RdsConnection, RdsDataError> {
    let config = RdsConfig::from_json_str(dsn)?;
    let region = config.region();
    if region.is_empty() {
        return Err(RdsDataError::ConfigError(format!(
            "no region in ResourceArn {}",
            config.resource_arn
        )));
    }
    let api = Arc::new(crate::client::HttpDataApi::for_region(region));
    RdsConnection::new(&config, api)
}

/// Build a connection and make sure the target answers.
///
/// # Errors
/// Returns `RdsDataError::ConfigError` for an invalid identity or
/// `RdsDataError::Unreachable` if the ping fails.
pub async fn connect(
    cx: &CallContext,
    config: &RdsConfig,
    api: Arc<dyn DataApi>,
) -> Result<RdsConnection, RdsDataError> {
    let conn = RdsConnection::new(config, api)?;
    conn.ping(cx).await?;
    tracing::debug!(driver = DRIVER_NAME, region = config.region(), "connected");
    Ok(conn)
}

/// [`connect`] with the identity read from the environment.
///
/// # Errors
/// Same as [`connect`]; unset variables surface as `RdsDataError::ConfigError`.
pub async fn connect_from_env(
    cx: &CallContext,
    api: Arc<dyn DataApi>,
) -> Result<RdsConnection, RdsDataError> {
    connect(cx, &RdsConfig::from_env(), api).await
}
