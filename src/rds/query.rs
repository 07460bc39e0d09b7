use crate::client::{ArrayValue, ExecuteStatementResponse, Field};
use crate::results::{ExecResult, Rows};
use crate::types::RowValues;

/// Wrap a response envelope in a forward-only cursor.
#[must_use]
pub fn build_rows(out: ExecuteStatementResponse) -> Rows {
    Rows::new(out.column_metadata, out.records)
}

/// Read a response envelope as a write outcome.
#[must_use]
pub fn build_exec_result(out: ExecuteStatementResponse) -> ExecResult {
    let generated = out.generated_fields.into_iter().map(decode_field).collect();
    ExecResult::new(out.number_of_records_updated, generated)
}

pub(crate) fn decode_record(record: Vec<Field>) -> Vec<RowValues> {
    record.into_iter().map(decode_field).collect()
}

/// Convert one typed field into a `RowValues`.
#[must_use]
pub fn decode_field(field: Field) -> RowValues {
    match field {
        Field::IsNull(_) => RowValues::Null,
        Field::BooleanValue(b) => RowValues::Bool(b),
        Field::LongValue(i) => RowValues::Int(i),
        Field::DoubleValue(f) => RowValues::Float(f),
        Field::StringValue(s) => RowValues::Text(s),
        Field::BlobValue(bytes) => RowValues::Blob(bytes),
        Field::ArrayValue(array) => decode_array(array),
    }
}

fn decode_array(array: ArrayValue) -> RowValues {
    let items = match array {
        ArrayValue::BooleanValues(v) => v.into_iter().map(RowValues::Bool).collect(),
        ArrayValue::LongValues(v) => v.into_iter().map(RowValues::Int).collect(),
        ArrayValue::DoubleValues(v) => v.into_iter().map(RowValues::Float).collect(),
        ArrayValue::StringValues(v) => v.into_iter().map(RowValues::Text).collect(),
        ArrayValue::ArrayValues(v) => v.into_iter().map(decode_array).collect(),
    };
    RowValues::Array(items)
}
