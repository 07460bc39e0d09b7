use std::collections::HashMap;
use std::sync::Arc;

use crate::client::{ColumnMetadata, Field};
use crate::rds::query::decode_record;

use super::result_set::ResultSet;
use super::row::{CustomDbRow, index_columns};

/// Forward-only cursor over one `ExecuteStatement` response.
///
/// Rows are decoded as they are pulled; the cursor cannot be rewound. Everything it
/// yields was already in the single response envelope, nothing is fetched lazily.
#[derive(Debug)]
pub struct Rows {
    columns: Arc<Vec<ColumnMetadata>>,
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
    records: std::vec::IntoIter<Vec<Field>>,
}

impl Rows {
    pub(crate) fn new(columns: Vec<ColumnMetadata>, records: Vec<Vec<Field>>) -> Self {
        let column_names: Vec<String> = columns
            .iter()
            .map(|c| c.display_name().to_string())
            .collect();
        let column_index = index_columns(&column_names);
        Self {
            columns: Arc::new(columns),
            column_names: Arc::new(column_names),
            column_index: Arc::new(column_index),
            records: records.into_iter(),
        }
    }

    /// Column metadata, in the same order as each row's values.
    #[must_use]
    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.columns
    }

    #[must_use]
    pub fn column_names(&self) -> &Arc<Vec<String>> {
        &self.column_names
    }

    /// Rows not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.records.len()
    }

    /// Drain the remaining rows into a [`ResultSet`].
    #[must_use]
    pub fn into_result_set(self) -> ResultSet {
        let mut result_set = ResultSet::with_capacity(self.remaining());
        result_set.set_column_names(self.column_names.clone());
        for row in self {
            result_set.add_row(row);
        }
        result_set
    }
}

impl Iterator for Rows {
    type Item = CustomDbRow;

    fn next(&mut self) -> Option<CustomDbRow> {
        let record = self.records.next()?;
        Some(CustomDbRow::with_index(
            self.column_names.clone(),
            self.column_index.clone(),
            decode_record(record),
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Rows {}
