use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::RdsDataError;

pub const RESOURCE_ARN_ENV: &str = "RDS_RESOURCE_ARN";
pub const SECRET_ARN_ENV: &str = "RDS_SECRET_ARN";
pub const DATABASE_ENV: &str = "RDS_DATABASE";

/// Identity addressing one database through the Data API.
///
/// Serializes to the flat JSON object accepted by [`crate::driver::open`]:
/// ```rust
/// use rds_data_middleware::prelude::*;
///
/// let cfg = RdsConfig::new(
///     "arn:aws:rds:us-east-1:123456789012:cluster:demo",
///     "arn:aws:secretsmanager:us-east-1:123456789012:secret:demo",
/// );
/// assert_eq!(cfg.region(), "us-east-1");
/// assert!(cfg.to_string().starts_with(r#"{"ResourceArn":"#));
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RdsConfig {
    /// Cluster ARN
    #[serde(rename = "ResourceArn")]
    pub resource_arn: String,
    /// Secrets Manager ARN holding the database credentials
    #[serde(rename = "SecretArn")]
    pub secret_arn: String,
    #[serde(
        rename = "Database",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub database: Option<String>,
    #[serde(skip)]
    region: OnceLock<String>,
}

impl RdsConfig {
    #[must_use]
    pub fn new(resource_arn: impl Into<String>, secret_arn: impl Into<String>) -> Self {
        Self {
            resource_arn: resource_arn.into(),
            secret_arn: secret_arn.into(),
            database: None,
            region: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Read `RDS_RESOURCE_ARN`, `RDS_SECRET_ARN` and (optionally) `RDS_DATABASE`.
    ///
    /// Unset variables become empty strings; the connection constructor rejects those.
    #[must_use]
    pub fn from_env() -> Self {
        let cfg = Self::new(
            std::env::var(RESOURCE_ARN_ENV).unwrap_or_default(),
            std::env::var(SECRET_ARN_ENV).unwrap_or_default(),
        );
        match std::env::var(DATABASE_ENV) {
            Ok(db) if !db.is_empty() => cfg.with_database(db),
            _ => cfg,
        }
    }

    /// Parse the JSON form produced by `Display`.
    ///
    /// # Errors
    /// Returns `RdsDataError::ConfigError` if the string is not a valid identity object.
    pub fn from_json_str(cfg: &str) -> Result<Self, RdsDataError> {
        serde_json::from_str(cfg)
            .map_err(|e| RdsDataError::ConfigError(format!("parse string to config: {e}")))
    }

    /// Region taken from the fourth `:` segment of the resource ARN, or `""`.
    ///
    /// Computed once and cached.
    #[must_use]
    pub fn region(&self) -> &str {
        self.region.get_or_init(|| {
            self.resource_arn
                .split(':')
                .nth(3)
                .unwrap_or_default()
                .to_string()
        })
    }

    pub(crate) fn validate(&self) -> Result<(), RdsDataError> {
        if self.resource_arn.is_empty() {
            return Err(RdsDataError::ConfigError(
                "ResourceArn is required".to_string(),
            ));
        }
        if self.secret_arn.is_empty() {
            return Err(RdsDataError::ConfigError(
                "SecretArn is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromStr for RdsConfig {
    type Err = RdsDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

impl fmt::Display for RdsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(e) => write!(f, "error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLUSTER: &str = "arn:aws:rds:us-east-1:123456789012:cluster:demo";

    #[test]
    fn region_from_resource_arn() {
        let cfg = RdsConfig::new(CLUSTER, "arn:sec");
        assert_eq!(cfg.region(), "us-east-1");
    }

    #[test]
    fn short_arn_has_empty_region() {
        let cfg = RdsConfig::new("short:arn", "arn:sec");
        assert_eq!(cfg.region(), "");
    }

    #[test]
    fn region_is_cached() {
        let cfg = RdsConfig::new(CLUSTER, "arn:sec");
        let first = cfg.region();
        let second = cfg.region();
        assert_eq!(first, second);
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn json_round_trip_skips_region() {
        let cfg = RdsConfig::new(CLUSTER, "arn:sec");
        let _ = cfg.region();
        let json = cfg.to_string();
        assert_eq!(
            json,
            format!(r#"{{"ResourceArn":"{CLUSTER}","SecretArn":"arn:sec"}}"#)
        );

        let parsed: RdsConfig = json.parse().unwrap();
        assert_eq!(parsed.resource_arn, CLUSTER);
        assert_eq!(parsed.secret_arn, "arn:sec");
        assert_eq!(parsed.database, None);
        assert_eq!(parsed.region(), "us-east-1");
    }

    #[test]
    fn database_is_optional_member() {
        let parsed = RdsConfig::from_json_str(
            r#"{"ResourceArn":"a:b:c:d","SecretArn":"s","Database":"app"}"#,
        )
        .unwrap();
        assert_eq!(parsed.database.as_deref(), Some("app"));
        assert!(parsed.to_string().contains(r#""Database":"app""#));
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = RdsConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, RdsDataError::ConfigError(_)));

        let err = RdsConfig::from_json_str(r#"{"SecretArn":"s"}"#).unwrap_err();
        assert!(err.to_string().contains("ResourceArn"));
    }

    #[test]
    fn validate_requires_both_arns() {
        assert!(RdsConfig::new("", "s").validate().is_err());
        assert!(RdsConfig::new("r", "").validate().is_err());
        assert!(RdsConfig::new("r", "s").validate().is_ok());
    }
}
