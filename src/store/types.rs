use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::StoredProperty;

/// Comparison applied by a where clause
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Operator {
    /// Case-insensitive substring match
    Contains,
    ExactMatch,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
}

/// One condition of a record query. A row matches when its field matches
/// any of the values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WhereClause {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

impl WhereClause {
    pub fn new(field_name: &str, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field_name: field_name.to_string(),
            operator,
            values: vec![value.into()],
        }
    }

    /// Evaluates the clause against a serialized row
    pub fn matches(&self, row: &Value) -> bool {
        let Some(field) = row.get(&self.field_name).filter(|v| !v.is_null()) else {
            return false;
        };

        self.values.iter().any(|expected| match self.operator {
            Operator::Contains => match (field.as_str(), expected.as_str()) {
                (Some(haystack), Some(needle)) => {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
            Operator::ExactMatch => field == expected,
            Operator::LessThanOrEqualTo => match (field.as_f64(), expected.as_f64()) {
                (Some(actual), Some(bound)) => actual <= bound,
                _ => false,
            },
            Operator::GreaterThanOrEqualTo => match (field.as_f64(), expected.as_f64()) {
                (Some(actual), Some(bound)) => actual >= bound,
                _ => false,
            },
        })
    }
}

/// Body of a fetch-records call
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FetchParams {
    #[serde(rename = "Fields")]
    pub fields: Vec<String>,
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub where_clauses: Vec<WhereClause>,
}

/// Reply to a fetch-records call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<StoredProperty>>,
}

/// Reply to a fetch-by-id call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<StoredProperty>,
}

/// Outcome for one record of a create, update or delete batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<StoredProperty>,
}

impl RecordResult {
    pub fn ok(data: Option<StoredProperty>) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Reply to a create, update or delete call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<RecordResult>>,
}
