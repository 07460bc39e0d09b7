/// Outcome returned by committing or rolling back a remote transaction.
///
/// The service reports a status string (e.g. `"Transaction Committed"`); nothing else
/// changes locally because the only local state was the transaction id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxOutcome {
    status: String,
}

impl TxOutcome {
    pub(crate) fn new(status: String) -> Self {
        Self { status }
    }

    /// Status text reported by the service.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }
}
