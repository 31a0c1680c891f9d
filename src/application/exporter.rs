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

//! # Exporter
//!
//! The one operation of the tool: validate, open a session, read the table
//! and write the file. The session lives in a local binding inside
//! `try_export`, so it is closed on every path out of that function,
//! including early returns through `?`.
//!
//! Nothing is retried. Errors are logged once and folded into a failed
//! `ExportResult`; whoever invoked the module decides what happens next.

use crate::domain::entities::{ConnectionConfig, ExportRequest, ExportResult};
use crate::domain::errors::Result;
use crate::ports::session_port::SessionPort;
use crate::ports::sink_port::SinkPort;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Instant;

pub struct Exporter {
    session_port: Arc<dyn SessionPort>,
    sink_port: Arc<dyn SinkPort>,
}

impl Exporter {
    pub fn new(session_port: Arc<dyn SessionPort>, sink_port: Arc<dyn SinkPort>) -> Self {
        Self {
            session_port,
            sink_port,
        }
    }

    /// Exports `request.table_name` to `request.save_path`. Never panics on
    /// a database or filesystem failure; the outcome is in the result.
    pub fn export(&self, config: &ConnectionConfig, request: &ExportRequest) -> ExportResult {
        let start_time = Instant::now();
        info!(
            "Starting {} of {} to {}",
            request.action,
            request.table_name,
            request.save_path.display()
        );

        match self.try_export(config, request) {
            Ok(rows) => {
                info!(
                    "Exported {} rows from {} in {:.2}s",
                    rows,
                    request.table_name,
                    start_time.elapsed().as_secs_f64()
                );
                ExportResult::success(&request.save_path, rows)
            }
            Err(e) => {
                error!("Export of {} failed: {}", request.table_name, e);
                ExportResult::failure(&request.save_path, &e)
            }
        }
    }

    fn try_export(&self, config: &ConnectionConfig, request: &ExportRequest) -> Result<u64> {
        config.validate()?;
        request.validate()?;

        let session = self.session_port.open(config)?;
        let snapshot = session.select_all(&request.table_name)?;
        debug!("Columns of {}: {:?}", request.table_name, snapshot.column_names());
        self.sink_port.write_snapshot(snapshot, &request.save_path)
    }
}
