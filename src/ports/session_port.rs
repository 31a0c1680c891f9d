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

//! # Session Port
//!
//! The contract for "something that can hand us a table". The exporter only
//! talks to these traits, so the Oracle adapter can be swapped for an
//! in-memory fake in tests.

use crate::domain::entities::{ConnectionConfig, TableSnapshot};
use crate::domain::errors::Result;

/// Opens database sessions.
pub trait SessionPort: Send + Sync {
    /// Opens one session. Every failure is reported as `ExportError::Connection`.
    fn open(&self, config: &ConnectionConfig) -> Result<Box<dyn TableSession>>;
}

/// An open session. Dropping it closes the underlying connection.
pub trait TableSession {
    /// Runs `SELECT * FROM <table_name>` and returns the column list plus a
    /// lazy row stream. Failures are reported as `ExportError::Query`.
    fn select_all(&self, table_name: &str) -> Result<TableSnapshot<'_>>;
}
