use std::sync::Arc;

use rds_data_middleware::client::{DataApiError, Field};
use rds_data_middleware::prelude::*;
use rds_data_middleware::test_utils::{MockDataApi, RecordedCall, rows_response};

fn connection(api: &MockDataApi) -> RdsConnection {
    let cfg = RdsConfig::new(
        "arn:aws:rds:us-east-2:123456789012:cluster:ledger",
        "arn:aws:secretsmanager:us-east-2:123456789012:secret:ledger",
    )
    .with_database("ledger");
    RdsConnection::new(&cfg, Arc::new(api.clone())).unwrap()
}

#[tokio::test]
async fn test2_begin_execute_commit() -> Result<(), Box<dyn std::error::Error>> {
    let api = MockDataApi::new();
    let conn = connection(&api);
    let cx = CallContext::background();

    let tx = conn.begin(&cx).await?;
    assert_eq!(tx.id().as_str(), "tx-1");
    assert_eq!(api.open_transactions(), 1);

    tx.execute(
        &cx,
        "UPDATE accounts SET balance = balance - :amount WHERE id = :id",
        &[
            NamedValue::named("amount", 25.0),
            NamedValue::named("id", 1_i64),
        ],
    )
    .await?;
    let outcome = tx.commit(&cx).await?;

    assert_eq!(outcome.status(), "Transaction Committed");
    assert_eq!(api.open_transactions(), 0);

    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    match &calls[0] {
        RecordedCall::Begin(req) => assert_eq!(req.database.as_deref(), Some("ledger")),
        other => panic!("expected begin, got {other:?}"),
    }
    match &calls[1] {
        RecordedCall::Execute(req) => assert_eq!(req.transaction_id.as_deref(), Some("tx-1")),
        other => panic!("expected execute, got {other:?}"),
    }
    match &calls[2] {
        RecordedCall::Commit(req) => assert_eq!(req.transaction_id, "tx-1"),
        other => panic!("expected commit, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test2_begin_rollback() -> Result<(), Box<dyn std::error::Error>> {
    let api = MockDataApi::new();
    let conn = connection(&api);
    let cx = CallContext::background();

    let tx = conn.begin(&cx).await?;
    tx.execute(
        &cx,
        "DELETE FROM entries WHERE id = :id",
        &[NamedValue::named("id", 9_i64)],
    )
    .await?;
    let outcome = tx.rollback(&cx).await?;

    assert_eq!(outcome.status(), "Rollback Complete");
    assert_eq!(api.open_transactions(), 0);
    assert!(matches!(
        api.calls().last(),
        Some(RecordedCall::Rollback(req)) if req.transaction_id == "tx-1"
    ));
    Ok(())
}

#[tokio::test]
async fn test2_unknown_transaction_error_passes_through() {
    let api = MockDataApi::new();
    let conn = connection(&api);
    let cx = CallContext::background();

    let stale = TransactionId::new("tx-gone");
    let err = conn.commit_transaction(&cx, &stale).await.unwrap_err();

    // commit/rollback failures are the service's error, unwrapped
    match err {
        RdsDataError::Remote(DataApiError::Service { code, message }) => {
            assert_eq!(code, "NotFoundException");
            assert!(message.contains("tx-gone"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = conn.rollback_transaction(&cx, &stale).await.unwrap_err();
    assert!(matches!(err, RdsDataError::Remote(DataApiError::Service { .. })));
}

#[tokio::test]
async fn test2_statement_after_commit_is_rejected_remotely() {
    let api = MockDataApi::new();
    let conn = connection(&api);
    let cx = CallContext::background();

    let tx = conn.begin(&cx).await.unwrap();
    let id = tx.id().clone();
    tx.commit(&cx).await.unwrap();

    let err = conn
        .execute_in_transaction(&cx, &id, "UPDATE t SET x = 1", &[])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RdsDataError::RemoteCall { call: "ExecuteStatement", .. }
    ));
}

#[tokio::test]
async fn test2_prepared_statement_carries_transaction_id() {
    let api = MockDataApi::new();
    api.push_response(rows_response(&["balance"], vec![vec![Field::DoubleValue(75.0)]]));
    let conn = connection(&api);
    let cx = CallContext::background();

    let tx = conn.begin(&cx).await.unwrap();
    let stmt = tx.prepare("SELECT balance FROM accounts WHERE id = :id");
    assert_eq!(stmt.transaction_id(), Some(tx.id()));

    let balance: f64 = stmt
        .query(&cx, &[NamedValue::named("id", 1_i64)])
        .await
        .unwrap()
        .next()
        .unwrap()
        .try_get(0)
        .unwrap();
    assert!((balance - 75.0).abs() < f64::EPSILON);

    tx.commit(&cx).await.unwrap();

    let requests = api.execute_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].transaction_id.as_deref(), Some("tx-1"));
}

#[tokio::test]
async fn test2_transactions_are_independent() {
    let api = MockDataApi::new();
    let conn = connection(&api);
    let cx = CallContext::background();

    let first = conn.begin(&cx).await.unwrap();
    let second = conn.begin(&cx).await.unwrap();
    assert_ne!(first.id(), second.id());

    // work outside either transaction carries no id
    conn.execute(&cx, "UPDATE audit SET seen = true", &[])
        .await
        .unwrap();
    second.execute(&cx, "UPDATE t SET x = 2", &[]).await.unwrap();
    first.rollback(&cx).await.unwrap();
    second.commit(&cx).await.unwrap();

    let ids: Vec<Option<String>> = api
        .execute_requests()
        .into_iter()
        .map(|r| r.transaction_id)
        .collect();
    assert_eq!(ids, vec![None, Some("tx-2".to_string())]);
}

#[tokio::test]
async fn test2_begin_failure_is_returned() {
    let api = MockDataApi::new();
    api.fail_all(DataApiError::Service {
        code: "ForbiddenException".to_string(),
        message: "not authorized".to_string(),
    });
    let conn = connection(&api);

    let err = conn.begin(&CallContext::background()).await.unwrap_err();
    assert_eq!(err.to_string(), "ForbiddenException: not authorized");
}
