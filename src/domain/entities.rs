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

//! # Domain Entities
//!
//! The nouns of the exporter: where to connect (`ConnectionConfig`), what to
//! export (`ExportRequest`), what comes back from the database
//! (`TableSnapshot`) and what is reported to the caller (`ExportResult`).

use crate::domain::errors::{ExportError, Result};
use crate::domain::identifier::validate_table_name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default Oracle listener port.
pub const DEFAULT_PORT: u16 = 1521;

/// Everything needed to open one Oracle session.
#[derive(Clone)]
pub struct ConnectionConfig {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub service_name: String,
    /// Connect over TLS using the wallet in `wallet_location`.
    pub use_tcps: bool,
    pub wallet_location: Option<PathBuf>,
    /// Directory holding the Oracle client libraries (libclntsh).
    pub client_lib_dir: Option<PathBuf>,
    /// Raw connect string or tnsnames alias; replaces host/port/service_name when set.
    pub dsn: Option<String>,
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("username", &self.username)
            .field("password", &"********")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("service_name", &self.service_name)
            .field("use_tcps", &self.use_tcps)
            .field("wallet_location", &self.wallet_location)
            .field("client_lib_dir", &self.client_lib_dir)
            .field("dsn", &self.dsn)
            .finish()
    }
}

impl ConnectionConfig {
    /// Creates a plain-TCP configuration on the default port.
    pub fn new(username: &str, password: &str, host: &str, service_name: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            host: host.to_string(),
            port: DEFAULT_PORT,
            service_name: service_name.to_string(),
            use_tcps: false,
            wallet_location: None,
            client_lib_dir: None,
            dsn: None,
        }
    }

    /// Wallet directory, if one was given. Empty paths count as absent.
    pub fn wallet_dir(&self) -> Option<&Path> {
        non_empty_path(&self.wallet_location)
    }

    pub fn client_lib_path(&self) -> Option<&Path> {
        non_empty_path(&self.client_lib_dir)
    }

    pub fn dsn_override(&self) -> Option<&str> {
        self.dsn.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// Checks field presence. Wallet contents are checked when connecting.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ExportError::Configuration(
                "username cannot be empty".to_string(),
            ));
        }
        if self.password.is_empty() {
            return Err(ExportError::Configuration(
                "password cannot be empty".to_string(),
            ));
        }
        if self.dsn_override().is_none() {
            if self.host.trim().is_empty() {
                return Err(ExportError::Configuration(
                    "host cannot be empty".to_string(),
                ));
            }
            if self.service_name.trim().is_empty() {
                return Err(ExportError::Configuration(
                    "service_name cannot be empty".to_string(),
                ));
            }
            if self.port == 0 {
                return Err(ExportError::Configuration(
                    "port must be greater than 0".to_string(),
                ));
            }
        }
        if self.client_lib_path().is_none() {
            return Err(ExportError::Configuration(
                "client_lib_dir cannot be empty".to_string(),
            ));
        }
        if self.use_tcps && self.wallet_dir().is_none() {
            return Err(ExportError::Configuration(
                "wallet_location is required when use_tcps is true".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_empty_path(p: &Option<PathBuf>) -> Option<&Path> {
    p.as_deref().filter(|p| !p.as_os_str().is_empty())
}

/// The single action the exporter understands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportAction {
    Export,
}

impl ExportAction {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "export" => Ok(ExportAction::Export),
            other => Err(ExportError::Configuration(format!(
                "unsupported action '{}' (choices: export)",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportAction::Export => write!(f, "export"),
        }
    }
}

/// What to export and where to put it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    pub table_name: String,
    pub save_path: PathBuf,
    pub action: ExportAction,
}

impl ExportRequest {
    pub fn new(table_name: &str, save_path: impl Into<PathBuf>) -> Self {
        Self {
            table_name: table_name.to_string(),
            save_path: save_path.into(),
            action: ExportAction::Export,
        }
    }

    /// Validates the table identifier and that the destination directory exists.
    pub fn validate(&self) -> Result<()> {
        validate_table_name(&self.table_name)?;

        if self.save_path.as_os_str().is_empty() {
            return Err(ExportError::Configuration(
                "save_path cannot be empty".to_string(),
            ));
        }
        if self.save_path.is_dir() {
            return Err(ExportError::Configuration(format!(
                "save_path {} is a directory",
                self.save_path.display()
            )));
        }

        let parent = self.destination_dir();
        if !parent.is_dir() {
            return Err(ExportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("destination directory {} does not exist", parent.display()),
            )));
        }
        Ok(())
    }

    /// Directory the file lands in; a bare file name means the working directory.
    pub fn destination_dir(&self) -> &Path {
        match self.save_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

/// A result-set column as reported by the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// `CHAR` / `NCHAR`: values come back right-padded with spaces.
    pub fixed_width: bool,
}

impl ColumnDescriptor {
    pub fn new(name: &str, fixed_width: bool) -> Self {
        Self {
            name: name.to_string(),
            fixed_width,
        }
    }
}

/// One fetched row; `None` is SQL NULL.
pub type Row = Vec<Option<String>>;

/// Columns plus a lazy row stream for a single `SELECT *`.
///
/// Borrows the session it came from, so it cannot outlive it.
pub struct TableSnapshot<'a> {
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Box<dyn Iterator<Item = Result<Row>> + 'a>,
}

impl<'a> TableSnapshot<'a> {
    pub fn new(
        columns: Vec<ColumnDescriptor>,
        rows: impl Iterator<Item = Result<Row>> + 'a,
    ) -> Self {
        Self {
            columns,
            rows: Box::new(rows),
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Outcome of one export, reported back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportResult {
    pub success: bool,
    pub row_count: u64,
    pub output_path: String,
    pub error_message: Option<String>,
    /// `configuration`, `connection`, `query` or `io` on failure.
    pub error_category: Option<String>,
}

impl ExportResult {
    pub fn success(output_path: &Path, row_count: u64) -> Self {
        Self {
            success: true,
            row_count,
            output_path: output_path.display().to_string(),
            error_message: None,
            error_category: None,
        }
    }

    pub fn failure(output_path: &Path, error: &ExportError) -> Self {
        Self {
            success: false,
            row_count: 0,
            output_path: output_path.display().to_string(),
            error_message: Some(error.to_string()),
            error_category: Some(error.category().to_string()),
        }
    }

    /// Human-readable status line for the table.
    pub fn summary(&self, table_name: &str) -> String {
        if self.success {
            format!(
                "Table {} exported successfully to {} ({} rows)",
                table_name, self.output_path, self.row_count
            )
        } else {
            format!(
                "Failed to export table {}: {}",
                table_name,
                self.error_message.as_deref().unwrap_or("unknown error")
            )
        }
    }
}
