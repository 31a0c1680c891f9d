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

//! Local adapter that writes a table snapshot as a flat CSV file.
//!
//! Rows go to a temporary file next to the destination, which is renamed
//! over `save_path` only once every row has been written and synced. A
//! failure at any point drops the temporary file and leaves whatever was at
//! `save_path` before untouched.

use crate::domain::entities::TableSnapshot;
use crate::domain::errors::{ExportError, Result};
use crate::domain::formatting::{render_row, FIELD_DELIMITER};
use crate::ports::sink_port::SinkPort;
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use log::{debug, info};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Concrete implementation of `SinkPort` for the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct CsvFileAdapter;

impl SinkPort for CsvFileAdapter {
    fn write_snapshot(&self, snapshot: TableSnapshot<'_>, path: &Path) -> Result<u64> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)?;
        debug!("Staging export in {}", tmp.path().display());

        let mut wtr = WriterBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(tmp);

        let TableSnapshot { columns, rows } = snapshot;

        let header: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        wtr.write_record(&header).map_err(csv_error)?;

        let mut count: u64 = 0;
        for row_res in rows {
            let row = row_res?;
            write_row(&mut wtr, render_row(&columns, &row))?;
            count += 1;
        }

        wtr.flush()?;
        let tmp = wtr.into_inner().map_err(|e| {
            ExportError::Io(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })?;

        tmp.as_file().sync_all()?;
        set_default_permissions(&tmp)?;
        tmp.persist(path).map_err(|e| ExportError::Io(e.error))?;

        info!("Wrote {} rows to {}", count, path.display());
        Ok(count)
    }
}

// The csv writer quotes a record made of one empty field so it does not read
// back as a blank line. Output is never quoted, so that line goes out bare.
fn write_row(wtr: &mut Writer<NamedTempFile>, fields: Vec<&str>) -> Result<()> {
    if let [only] = fields.as_slice() {
        if only.is_empty() {
            wtr.flush()?;
            let mut file = wtr.get_ref().as_file();
            file.write_all(b"\n")?;
            return Ok(());
        }
    }
    wtr.write_record(&fields).map_err(csv_error)
}

fn csv_error(e: csv::Error) -> ExportError {
    ExportError::Io(e.into())
}

// Temp files are created 0600; the export should read like any other file.
#[cfg(unix)]
fn set_default_permissions(tmp: &NamedTempFile) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file()
        .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_default_permissions(_tmp: &NamedTempFile) -> Result<()> {
    Ok(())
}
