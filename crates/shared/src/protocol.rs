use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AckNumber, Year};

pub const CASE_ROUTE_PREFIX: &str = "/api/case";

/// Path of the case lookup endpoint, relative to the service base URL.
pub fn case_path(year: Year, identifier: &AckNumber) -> String {
    format!("{CASE_ROUTE_PREFIX}/{year}/{identifier}")
}

/// Body the service sends alongside a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
        }
    }

    /// Picks the `error` field out of an arbitrary JSON body. Non-string and
    /// empty values count as absent.
    pub fn from_json(body: &Value) -> Self {
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string);
        Self { error }
    }
}
