/// Values that can be bound as parameters or read back from a row.
///
/// This is a closed set: the parameter encoder matches on it exhaustively.
/// ```rust
/// use rds_data_middleware::prelude::*;
///
/// let params = vec![
///     NamedValue::named("id", RowValues::Int(1)),
///     NamedValue::named("name", RowValues::Text("alice".into())),
///     NamedValue::named("active", RowValues::Bool(true)),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// NULL value
    Null,
    /// Binary data
    Blob(Vec<u8>),
    /// Array column value; produced by result decoding only, never encodable as a parameter
    Array(Vec<RowValues>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[RowValues]> {
        if let RowValues::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            RowValues::Int(_) => "long",
            RowValues::Float(_) => "double",
            RowValues::Text(_) => "string",
            RowValues::Bool(_) => "boolean",
            RowValues::Null => "null",
            RowValues::Blob(_) => "blob",
            RowValues::Array(_) => "array",
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<Vec<u8>> for RowValues {
    fn from(value: Vec<u8>) -> Self {
        RowValues::Blob(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// A bind argument: a value plus the name it binds to.
///
/// Only named arguments reach the service. Arguments built with
/// [`NamedValue::positional`] stay unnamed unless
/// [`rewrite_ordinal_params`](crate::translation::rewrite_ordinal_params) assigns a name;
/// once set, a name never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    name: Option<String>,
    ordinal: usize,
    value: RowValues,
}

impl NamedValue {
    pub fn named(name: impl Into<String>, value: impl Into<RowValues>) -> Self {
        Self {
            name: Some(name.into()),
            ordinal: 0,
            value: value.into(),
        }
    }

    /// Unnamed argument for the 1-based placeholder `$ordinal`.
    pub fn positional(ordinal: usize, value: impl Into<RowValues>) -> Self {
        Self {
            name: None,
            ordinal,
            value: value.into(),
        }
    }

    /// The bound name; `None` (or an empty name) is rejected at execution.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    #[must_use]
    pub fn value(&self) -> &RowValues {
        &self.value
    }

    /// Assign a name to an unnamed argument. Returns `false` if it already had one.
    pub(crate) fn assign_name(&mut self, name: &str) -> bool {
        if self.name.is_some() {
            return false;
        }
        self.name = Some(name.to_string());
        true
    }
}
