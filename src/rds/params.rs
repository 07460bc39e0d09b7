use crate::client::{Field, SqlParameter};
use crate::error::RdsDataError;
use crate::types::{NamedValue, RowValues};

/// Parameters converted to the Data API's typed representation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<SqlParameter>);

impl Params {
    /// Convert named arguments into `SqlParameter`s.
    ///
    /// # Errors
    /// Returns `RdsDataError::Unsupported` if an argument has no (or an empty) name, or
    /// holds a value the service cannot bind.
    pub fn convert(params: &[NamedValue]) -> Result<Params, RdsDataError> {
        let mut converted = Vec::with_capacity(params.len());
        for param in params {
            let name = match param.name() {
                Some(name) if !name.is_empty() => name,
                _ => {
                    return Err(RdsDataError::Unsupported(
                        "only named parameters supported".to_string(),
                    ));
                }
            };
            converted.push(SqlParameter {
                name: name.to_string(),
                value: encode_value(name, param.value())?,
            });
        }
        Ok(Params(converted))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SqlParameter] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<SqlParameter> {
        self.0
    }
}

/// Encode one value as a typed field. NULL becomes an explicit `isNull` field.
///
/// # Errors
/// Returns `RdsDataError::Unsupported` naming the parameter for values outside the
/// bindable set (arrays).
pub fn encode_value(name: &str, value: &RowValues) -> Result<Field, RdsDataError> {
    match value {
        RowValues::Null => Ok(Field::IsNull(true)),
        RowValues::Text(s) => Ok(Field::StringValue(s.clone())),
        RowValues::Blob(bytes) => Ok(Field::BlobValue(bytes.clone())),
        RowValues::Bool(b) => Ok(Field::BooleanValue(*b)),
        RowValues::Float(f) => Ok(Field::DoubleValue(*f)),
        RowValues::Int(i) => Ok(Field::LongValue(*i)),
        RowValues::Array(_) => Err(RdsDataError::Unsupported(format!(
            "{name} is unsupported type: {value:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rds::query::decode_field;

    #[test]
    fn supported_values_round_trip() {
        let values = [
            RowValues::Null,
            RowValues::Text(String::new()),
            RowValues::Text("héllo".into()),
            RowValues::Blob(Vec::new()),
            RowValues::Blob(vec![0, 255, 7]),
            RowValues::Bool(false),
            RowValues::Bool(true),
            RowValues::Float(0.0),
            RowValues::Float(-2.5),
            RowValues::Int(0),
            RowValues::Int(i64::MIN),
        ];
        for value in values {
            let field = encode_value("p", &value).unwrap();
            assert_eq!(decode_field(field), value);
        }
    }

    #[test]
    fn null_is_explicit() {
        assert_eq!(encode_value("p", &RowValues::Null).unwrap(), Field::IsNull(true));
    }

    #[test]
    fn array_is_unsupported_and_named() {
        let err = encode_value("tags", &RowValues::Array(vec![RowValues::Int(1)])).unwrap_err();
        assert!(matches!(err, RdsDataError::Unsupported(_)));
        let msg = err.to_string();
        assert!(msg.contains("tags is unsupported type"));
        assert!(msg.contains("Array"));
    }

    #[test]
    fn convert_keeps_order_and_names() {
        let params = Params::convert(&[
            NamedValue::named("id", 1_i64),
            NamedValue::named("nick", RowValues::Null),
        ])
        .unwrap();
        assert_eq!(
            params.as_slice(),
            &[
                SqlParameter {
                    name: "id".into(),
                    value: Field::LongValue(1)
                },
                SqlParameter {
                    name: "nick".into(),
                    value: Field::IsNull(true)
                },
            ]
        );
    }

    #[test]
    fn unnamed_or_empty_names_are_rejected() {
        let err = Params::convert(&[NamedValue::positional(1, 1_i64)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported usage: only named parameters supported"
        );
        assert!(Params::convert(&[NamedValue::named("", 1_i64)]).is_err());
    }
}
