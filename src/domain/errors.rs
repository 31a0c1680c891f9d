// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Core error definitions for the table exporter.
//!
//! Every failure of an export falls into one of four categories. None of
//! them is retried: the caller receives a failed `ExportResult` carrying the
//! rendered message and decides what to do with the job.

use thiserror::Error;

/// Error types encountered during an export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Missing or malformed input (empty fields, TCPS without a wallet, bad identifier).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The session could not be established (network, credentials, TLS, wallet).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The table could not be read.
    #[error("Query failed for {table}: {reason}")]
    Query { table: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Short machine-readable name of the error category.
    pub fn category(&self) -> &'static str {
        match self {
            ExportError::Configuration(_) => "configuration",
            ExportError::Connection(_) => "connection",
            ExportError::Query { .. } => "query",
            ExportError::Io(_) => "io",
        }
    }

    pub fn query(table: &str, reason: impl Into<String>) -> Self {
        ExportError::Query {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for the table exporter.
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            ExportError::Configuration("x".into()).category(),
            "configuration"
        );
        assert_eq!(ExportError::Connection("x".into()).category(), "connection");
        assert_eq!(ExportError::query("T", "missing").category(), "query");
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(ExportError::from(io).category(), "io");
    }

    #[test]
    fn test_query_message_names_table() {
        let e = ExportError::query("HR.EMPLOYEES", "ORA-00942: table or view does not exist");
        assert_eq!(
            e.to_string(),
            "Query failed for HR.EMPLOYEES: ORA-00942: table or view does not exist"
        );
    }
}
