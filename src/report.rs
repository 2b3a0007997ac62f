// Result record returned by every lookup
//
// A record carries either a report or an error, never both and never
// neither. Fields are private so the two constructors are the only way in.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Error text used when the agent finished without producing anything
pub const NO_OUTPUT_ERROR: &str = "No output generated";

/// Outcome of one person lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    report: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,

    /// When the lookup completed
    timestamp: DateTime<Local>,

    /// The query as the caller supplied it
    query: String,
}

impl LookupResult {
    pub fn success(query: impl Into<String>, report: impl Into<String>) -> Self {
        Self {
            success: true,
            report: Some(report.into()),
            error: None,
            timestamp: Local::now(),
            query: query.into(),
        }
    }

    pub fn failure(query: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            report: None,
            error: Some(error.into()),
            timestamp: Local::now(),
            query: query.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Single-string rendering: the report, or `"Error: <message>"`
    pub fn into_message(self) -> String {
        match (self.report, self.error) {
            (Some(report), _) if self.success => report,
            (_, Some(error)) => format!("Error: {}", error),
            (_, None) => format!("Error: {}", NO_OUTPUT_ERROR),
        }
    }
}
