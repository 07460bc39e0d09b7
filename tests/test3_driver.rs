use std::sync::Arc;

use rds_data_middleware::client::DataApiError;
use rds_data_middleware::config::RESOURCE_ARN_ENV;
use rds_data_middleware::prelude::*;
use rds_data_middleware::test_utils::MockDataApi;

const DSN: &str = r#"{"ResourceArn":"arn:aws:rds:ap-south-1:123456789012:cluster:inventory","SecretArn":"arn:aws:secretsmanager:ap-south-1:123456789012:secret:inventory","Database":"stock"}"#;

#[test]
fn test3_open_parses_identity_without_network() {
    let api = MockDataApi::new();
    let conn = open(DSN, Arc::new(api.clone())).unwrap();

    assert_eq!(
        conn.resource_arn(),
        "arn:aws:rds:ap-south-1:123456789012:cluster:inventory"
    );
    assert_eq!(
        conn.secret_arn(),
        "arn:aws:secretsmanager:ap-south-1:123456789012:secret:inventory"
    );
    assert_eq!(conn.database(), Some("stock"));
    assert_eq!(api.call_count(), 0);
}

#[test]
fn test3_open_rejects_bad_identity() {
    let api: Arc<dyn DataApi> = Arc::new(MockDataApi::new());

    let err = open("ResourceArn=foo", Arc::clone(&api)).unwrap_err();
    match err {
        RdsDataError::ConfigError(msg) => assert!(msg.starts_with("parse string to config")),
        other => panic!("unexpected error: {other:?}"),
    }

    let err = open(r#"{"ResourceArn":"","SecretArn":"s"}"#, Arc::clone(&api)).unwrap_err();
    assert!(matches!(err, RdsDataError::ConfigError(ref m) if m == "ResourceArn is required"));

    let err = open(r#"{"ResourceArn":"r","SecretArn":""}"#, api).unwrap_err();
    assert!(matches!(err, RdsDataError::ConfigError(ref m) if m == "SecretArn is required"));
}

#[test]
fn test3_config_string_round_trips_through_open() {
    let cfg = RdsConfig::new(
        "arn:aws:rds:us-west-2:123456789012:cluster:a",
        "arn:aws:secretsmanager:us-west-2:123456789012:secret:a",
    );
    let dsn = cfg.to_string();
    let conn = open(&dsn, Arc::new(MockDataApi::new())).unwrap();

    assert_eq!(conn.resource_arn(), cfg.resource_arn);
    assert_eq!(conn.database(), None);
    assert_eq!(DRIVER_NAME, "rds");
}

#[tokio::test]
async fn test3_connect_pings_once() {
    let api = MockDataApi::new();
    let cfg = RdsConfig::from_json_str(DSN).unwrap();

    let conn = connect(&CallContext::background(), &cfg, Arc::new(api.clone()))
        .await
        .unwrap();

    assert_eq!(conn.database(), Some("stock"));
    assert_eq!(api.execute_requests().len(), 1);
}

#[tokio::test]
async fn test3_connect_reports_unreachable() {
    let api = MockDataApi::new();
    api.fail_all(DataApiError::Transport("dns error".to_string()));
    let cfg = RdsConfig::from_json_str(DSN).unwrap();

    let err = connect(&CallContext::background(), &cfg, Arc::new(api))
        .await
        .unwrap_err();
    assert!(matches!(err, RdsDataError::Unreachable(_)));
}

#[tokio::test]
async fn test3_connect_from_env_requires_identity() {
    if std::env::var(RESOURCE_ARN_ENV).is_ok() {
        return;
    }
    let api = MockDataApi::new();

    let err = connect_from_env(&CallContext::background(), Arc::new(api.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, RdsDataError::ConfigError(_)));
    assert_eq!(api.call_count(), 0);
}

#[cfg(feature = "http")]
#[test]
fn test3_open_http_needs_a_region() {
    let conn = open_http(DSN).unwrap();
    assert_eq!(conn.database(), Some("stock"));

    let err = open_http(r#"{"ResourceArn":"cluster-without-arn","SecretArn":"s"}"#).unwrap_err();
    assert!(matches!(err, RdsDataError::ConfigError(ref m) if m.contains("no region")));
}
