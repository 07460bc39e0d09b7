//! In-memory stand-in for the Data API, for tests.
//!
//! `MockDataApi` records every request, hands out transaction ids, rejects commits,
//! rollbacks and statements that name an unknown transaction, and replays scripted
//! `ExecuteStatement` outcomes in order (an empty success once the script runs out).

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::client::{
    BeginTransactionRequest, BeginTransactionResponse, ColumnMetadata, CommitTransactionRequest,
    CommitTransactionResponse, DataApi, DataApiError, ExecuteStatementRequest,
    ExecuteStatementResponse, Field, RollbackTransactionRequest, RollbackTransactionResponse,
};

/// One request observed by [`MockDataApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Begin(BeginTransactionRequest),
    Execute(ExecuteStatementRequest),
    Commit(CommitTransactionRequest),
    Rollback(RollbackTransactionRequest),
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<RecordedCall>,
    scripted: VecDeque<Result<ExecuteStatementResponse, DataApiError>>,
    open_transactions: HashSet<String>,
    next_transaction: u64,
    fail_all: Option<DataApiError>,
    latency: Option<Duration>,
}

#[derive(Debug, Default, Clone)]
pub struct MockDataApi {
    state: Arc<Mutex<MockState>>,
}

impl MockDataApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Queue the outcome of the next `ExecuteStatement` call.
    pub fn push_response(&self, response: ExecuteStatementResponse) {
        self.lock().scripted.push_back(Ok(response));
    }

    /// Queue a failure for the next `ExecuteStatement` call.
    pub fn push_error(&self, error: DataApiError) {
        self.lock().scripted.push_back(Err(error));
    }

    /// Make every call fail with `error`, as an unreachable service would.
    pub fn fail_all(&self, error: DataApiError) {
        self.lock().fail_all = Some(error);
    }

    /// Delay every call by `latency` before answering.
    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = Some(latency);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    #[must_use]
    pub fn execute_requests(&self) -> Vec<ExecuteStatementRequest> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Execute(req) => Some(req.clone()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn open_transactions(&self) -> usize {
        self.lock().open_transactions.len()
    }

    async fn enter(&self, call: RecordedCall) -> Result<(), DataApiError> {
        let (latency, failure) = {
            let mut state = self.lock();
            state.calls.push(call);
            (state.latency, state.fail_all.clone())
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        failure.map_or(Ok(()), Err)
    }

    fn finish_transaction(&self, id: &str) -> Result<(), DataApiError> {
        if self.lock().open_transactions.remove(id) {
            Ok(())
        } else {
            Err(unknown_transaction(id))
        }
    }
}

fn unknown_transaction(id: &str) -> DataApiError {
    DataApiError::Service {
        code: "NotFoundException".to_string(),
        message: format!("Transaction {id} is not found"),
    }
}

#[async_trait]
impl DataApi for MockDataApi {
    async fn begin_transaction(
        &self,
        input: &BeginTransactionRequest,
    ) -> Result<BeginTransactionResponse, DataApiError> {
        self.enter(RecordedCall::Begin(input.clone())).await?;
        let mut state = self.lock();
        state.next_transaction += 1;
        let transaction_id = format!("tx-{}", state.next_transaction);
        state.open_transactions.insert(transaction_id.clone());
        Ok(BeginTransactionResponse { transaction_id })
    }

    async fn execute_statement(
        &self,
        input: &ExecuteStatementRequest,
    ) -> Result<ExecuteStatementResponse, DataApiError> {
        self.enter(RecordedCall::Execute(input.clone())).await?;
        let mut state = self.lock();
        if let Some(id) = &input.transaction_id
            && !state.open_transactions.contains(id)
        {
            return Err(unknown_transaction(id));
        }
        state
            .scripted
            .pop_front()
            .unwrap_or_else(|| Ok(ExecuteStatementResponse::default()))
    }

    async fn commit_transaction(
        &self,
        input: &CommitTransactionRequest,
    ) -> Result<CommitTransactionResponse, DataApiError> {
        self.enter(RecordedCall::Commit(input.clone())).await?;
        self.finish_transaction(&input.transaction_id)?;
        Ok(CommitTransactionResponse {
            transaction_status: "Transaction Committed".to_string(),
        })
    }

    async fn rollback_transaction(
        &self,
        input: &RollbackTransactionRequest,
    ) -> Result<RollbackTransactionResponse, DataApiError> {
        self.enter(RecordedCall::Rollback(input.clone())).await?;
        self.finish_transaction(&input.transaction_id)?;
        Ok(RollbackTransactionResponse {
            transaction_status: "Rollback Complete".to_string(),
        })
    }
}

/// Response carrying `records` under columns named `columns`.
#[must_use]
pub fn rows_response(columns: &[&str], records: Vec<Vec<Field>>) -> ExecuteStatementResponse {
    ExecuteStatementResponse {
        column_metadata: columns
            .iter()
            .map(|name| ColumnMetadata {
                name: (*name).to_string(),
                label: (*name).to_string(),
                ..ColumnMetadata::default()
            })
            .collect(),
        records,
        ..ExecuteStatementResponse::default()
    }
}

/// Response for a write touching `updated` rows.
#[must_use]
pub fn update_response(updated: i64, generated: Vec<Field>) -> ExecuteStatementResponse {
    ExecuteStatementResponse {
        number_of_records_updated: updated,
        generated_fields: generated,
        ..ExecuteStatementResponse::default()
    }
}
