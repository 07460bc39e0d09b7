use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RdsDataError;
use crate::types::RowValues;

/// A row from a database query result
///
/// This struct represents a single row from a database query result,
/// with access to both the column names and the values.
#[derive(Debug, Clone)]
pub struct CustomDbRow {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row
    pub rows: Vec<RowValues>,
    // Name -> index, shared by every row of one response
    column_index_cache: Arc<HashMap<String, usize>>,
}

impl CustomDbRow {
    /// Create a new database row
    ///
    /// # Arguments
    ///
    /// * `column_names` - The column names
    /// * `rows` - The values for this row
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, rows: Vec<RowValues>) -> Self {
        let cache = Arc::new(index_columns(&column_names));
        Self::with_index(column_names, cache, rows)
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index_cache: Arc<HashMap<String, usize>>,
        rows: Vec<RowValues>,
    ) -> Self {
        Self {
            column_names,
            rows,
            column_index_cache,
        }
    }

    /// Get the index of a column by name
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index_cache.get(column_name).copied()
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.rows.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.rows.get(index)
    }

    /// Decode the value at `index` as `T`.
    ///
    /// # Errors
    /// Returns `RdsDataError::DecodeError` if the index is out of range or the stored
    /// value's type does not match `T`.
    pub fn try_get<T: FromRowValue>(&self, index: usize) -> Result<T, RdsDataError> {
        let value = self.rows.get(index).ok_or_else(|| {
            RdsDataError::DecodeError(format!(
                "column index {index} out of range ({} columns)",
                self.rows.len()
            ))
        })?;
        T::from_row_value(value).map_err(|e| match e {
            RdsDataError::DecodeError(msg) => {
                RdsDataError::DecodeError(format!("column {index}: {msg}"))
            }
            other => other,
        })
    }

    /// Decode the value in column `column_name` as `T`.
    ///
    /// # Errors
    /// Returns `RdsDataError::DecodeError` if the column is unknown or its value's type
    /// does not match `T`.
    pub fn try_get_by_name<T: FromRowValue>(&self, column_name: &str) -> Result<T, RdsDataError> {
        let index = self.get_column_index(column_name).ok_or_else(|| {
            RdsDataError::DecodeError(format!("no column named {column_name}"))
        })?;
        self.try_get(index)
    }
}

pub(crate) fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        // first occurrence wins for duplicated names
        index.entry(name.clone()).or_insert(i);
    }
    index
}

/// Types a stored [`RowValues`] can be decoded into.
pub trait FromRowValue: Sized {
    /// # Errors
    /// Returns `RdsDataError::DecodeError` if `value` holds a different type.
    fn from_row_value(value: &RowValues) -> Result<Self, RdsDataError>;
}

fn mismatch(value: &RowValues, wanted: &str) -> RdsDataError {
    RdsDataError::DecodeError(format!("cannot read {} value as {wanted}", value.kind()))
}

impl FromRowValue for i64 {
    fn from_row_value(value: &RowValues) -> Result<Self, RdsDataError> {
        value.as_int().copied().ok_or_else(|| mismatch(value, "i64"))
    }
}

impl FromRowValue for f64 {
    fn from_row_value(value: &RowValues) -> Result<Self, RdsDataError> {
        value.as_float().ok_or_else(|| mismatch(value, "f64"))
    }
}

impl FromRowValue for bool {
    fn from_row_value(value: &RowValues) -> Result<Self, RdsDataError> {
        value.as_bool().copied().ok_or_else(|| mismatch(value, "bool"))
    }
}

impl FromRowValue for String {
    fn from_row_value(value: &RowValues) -> Result<Self, RdsDataError> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| mismatch(value, "String"))
    }
}

impl FromRowValue for Vec<u8> {
    fn from_row_value(value: &RowValues) -> Result<Self, RdsDataError> {
        value
            .as_blob()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| mismatch(value, "Vec<u8>"))
    }
}

impl FromRowValue for RowValues {
    fn from_row_value(value: &RowValues) -> Result<Self, RdsDataError> {
        Ok(value.clone())
    }
}

impl<T: FromRowValue> FromRowValue for Option<T> {
    fn from_row_value(value: &RowValues) -> Result<Self, RdsDataError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_row_value(value).map(Some)
        }
    }
}
