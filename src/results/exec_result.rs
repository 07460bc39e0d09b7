use crate::types::RowValues;

/// Outcome of a write executed through [`RdsConnection::execute`](crate::RdsConnection::execute).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecResult {
    rows_affected: i64,
    generated_fields: Vec<RowValues>,
}

impl ExecResult {
    pub(crate) fn new(rows_affected: i64, generated_fields: Vec<RowValues>) -> Self {
        Self {
            rows_affected,
            generated_fields,
        }
    }

    /// `numberOfRecordsUpdated` as reported by the service.
    #[must_use]
    pub fn rows_affected(&self) -> i64 {
        self.rows_affected
    }

    /// Values generated by the statement (e.g. auto-increment keys), when the engine
    /// reports them.
    #[must_use]
    pub fn generated_fields(&self) -> &[RowValues] {
        &self.generated_fields
    }

    /// First generated field, if it is an integer.
    #[must_use]
    pub fn last_insert_id(&self) -> Option<i64> {
        self.generated_fields.first().and_then(RowValues::as_int).copied()
    }
}
