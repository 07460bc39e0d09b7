//! Wire messages exchanged with the Data API.
//!
//! Field names follow the service's JSON (camelCase); optional members are omitted
//! rather than sent as `null`.

use serde::{Deserialize, Serialize};

/// A single typed value as sent to or received from the service.
///
/// Serialized externally tagged, e.g. `{"longValue": 7}` or `{"isNull": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    IsNull(bool),
    BooleanValue(bool),
    LongValue(i64),
    DoubleValue(f64),
    StringValue(String),
    BlobValue(#[serde(with = "blob")] Vec<u8>),
    ArrayValue(ArrayValue),
}

/// Array result values. Arrays are never accepted as parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrayValue {
    BooleanValues(Vec<bool>),
    LongValues(Vec<i64>),
    DoubleValues(Vec<f64>),
    StringValues(Vec<String>),
    ArrayValues(Vec<ArrayValue>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlParameter {
    pub name: String,
    pub value: Field,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStatementRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub sql: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<SqlParameter>,
    #[serde(default)]
    pub include_result_metadata: bool,
    #[serde(default)]
    pub continue_after_timeout: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default, rename = "type")]
    pub type_code: i32,
    #[serde(default)]
    pub nullable: i32,
    #[serde(default)]
    pub table_name: String,
}

impl ColumnMetadata {
    /// Column name as exposed to callers; falls back to the label for computed columns.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.label
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteStatementResponse {
    #[serde(default)]
    pub column_metadata: Vec<ColumnMetadata>,
    #[serde(default)]
    pub number_of_records_updated: i64,
    #[serde(default)]
    pub records: Vec<Vec<Field>>,
    #[serde(default)]
    pub generated_fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginTransactionRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginTransactionResponse {
    pub transaction_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitTransactionRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitTransactionResponse {
    #[serde(default)]
    pub transaction_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackTransactionRequest {
    pub resource_arn: String,
    pub secret_arn: String,
    pub transaction_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackTransactionResponse {
    #[serde(default)]
    pub transaction_status: String,
}

// Blobs travel as base64 strings.
mod blob {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fields_use_service_tags() {
        assert_eq!(
            serde_json::to_value(Field::IsNull(true)).unwrap(),
            json!({"isNull": true})
        );
        assert_eq!(
            serde_json::to_value(Field::LongValue(42)).unwrap(),
            json!({"longValue": 42})
        );
        assert_eq!(
            serde_json::to_value(Field::BlobValue(b"hi".to_vec())).unwrap(),
            json!({"blobValue": "aGk="})
        );
    }

    #[test]
    fn blob_field_decodes_from_base64() {
        let field: Field = serde_json::from_value(json!({"blobValue": "AAEC"})).unwrap();
        assert_eq!(field, Field::BlobValue(vec![0, 1, 2]));

        let bad = serde_json::from_value::<Field>(json!({"blobValue": "***"}));
        assert!(bad.is_err());
    }

    #[test]
    fn execute_request_omits_absent_members() {
        let request = ExecuteStatementRequest {
            resource_arn: "arn:res".to_string(),
            secret_arn: "arn:sec".to_string(),
            database: None,
            sql: "SELECT 1".to_string(),
            parameters: Vec::new(),
            include_result_metadata: true,
            continue_after_timeout: false,
            transaction_id: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "resourceArn": "arn:res",
                "secretArn": "arn:sec",
                "sql": "SELECT 1",
                "includeResultMetadata": true,
                "continueAfterTimeout": false
            })
        );
    }

    #[test]
    fn execute_response_parses_service_payload() {
        let payload = json!({
            "columnMetadata": [
                {"name": "id", "label": "id", "typeName": "int4", "type": 4, "nullable": 0},
                {"name": "", "label": "?column?", "typeName": "text", "type": 12}
            ],
            "numberOfRecordsUpdated": 0,
            "records": [
                [{"longValue": 1}, {"stringValue": "a"}],
                [{"longValue": 2}, {"isNull": true}]
            ]
        });
        let response: ExecuteStatementResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.column_metadata.len(), 2);
        assert_eq!(response.column_metadata[0].type_code, 4);
        assert_eq!(response.column_metadata[1].display_name(), "?column?");
        assert_eq!(response.records[1][1], Field::IsNull(true));
        assert!(response.generated_fields.is_empty());
    }

    #[test]
    fn nested_array_values_parse() {
        let field: Field = serde_json::from_value(json!({
            "arrayValue": {"arrayValues": [{"longValues": [1, 2]}, {"stringValues": ["x"]}]}
        }))
        .unwrap();
        assert_eq!(
            field,
            Field::ArrayValue(ArrayValue::ArrayValues(vec![
                ArrayValue::LongValues(vec![1, 2]),
                ArrayValue::StringValues(vec!["x".to_string()]),
            ]))
        );
    }
}
