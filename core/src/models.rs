//! Wire and domain types for the backend API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Query request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Table-list response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

/// One column of a table schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Schema plus a small sample of rows for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDetail {
    pub name: String,
    pub columns: Vec<TableColumn>,
    /// Rows are opaque JSON objects; nothing here inspects their shape.
    #[serde(default)]
    pub sample_data: Vec<Value>,
}

/// Query response as the backend encodes it. Query-level failures arrive as
/// HTTP 200 with `success: false`, so every field except the flag is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Execution time in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
}

/// Result of one query execution. Exactly one of rows/error exists.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    Success {
        rows: Vec<Value>,
        execution_time: Option<f64>,
    },
    Failure {
        error: String,
    },
}

impl QueryOutcome {
    /// Outcome synthesized when the backend could not be reached or the
    /// response body was not decodable.
    pub fn network_error() -> Self {
        Self::Failure {
            error: "Network error occurred".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn execution_time(&self) -> Option<f64> {
        match self {
            Self::Success { execution_time, .. } => *execution_time,
            Self::Failure { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

impl From<QueryResponse> for QueryOutcome {
    fn from(response: QueryResponse) -> Self {
        if response.success {
            Self::Success {
                rows: response.data.unwrap_or_default(),
                execution_time: response.execution_time,
            }
        } else {
            Self::Failure {
                error: response.error.unwrap_or_default(),
            }
        }
    }
}

/// One executed query as remembered by the history log.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub query: String,
    pub success: bool,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
