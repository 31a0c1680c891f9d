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

//! Infrastructure adapter that reads a whole table from Oracle.
//!
//! Opening a session walks the connect path (wallet check, client
//! initialisation, connect) and classifies every failure as a connection
//! error. Reading a table streams rows straight from the result set and
//! renders each Oracle type to text.

use crate::domain::entities::{ColumnDescriptor, ConnectionConfig, Row, TableSnapshot};
use crate::domain::errors::{ExportError, Result};
use crate::infrastructure::oracle::client_init::init_client;
use crate::infrastructure::oracle::descriptor::build_connect_target;
use crate::infrastructure::oracle::error_hints::describe;
use crate::infrastructure::oracle::sql_utils::select_all_sql;
use crate::infrastructure::oracle::wallet::verify_wallet_dir;
use crate::ports::session_port::{SessionPort, TableSession};
use base64::{engine::general_purpose, Engine as _};
use log::{debug, info, warn};
use oracle::sql_type::{OracleType, Timestamp};
use oracle::Connection;

/// Concrete implementation of `SessionPort` for Oracle databases.
#[derive(Debug, Default)]
pub struct OracleSessionAdapter;

impl OracleSessionAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl SessionPort for OracleSessionAdapter {
    fn open(&self, config: &ConnectionConfig) -> Result<Box<dyn TableSession>> {
        let target = build_connect_target(config);

        if target.use_tcps {
            // No wallet, no handshake: never fall back to plain TCP.
            let wallet = target.config_dir.as_deref().ok_or_else(|| {
                ExportError::Configuration(
                    "wallet_location is required when use_tcps is true".to_string(),
                )
            })?;
            verify_wallet_dir(wallet)?;
        }

        init_client(&target)?;

        info!(
            "Connecting to {} as {} over {}",
            target.connect_string,
            config.username,
            if target.use_tcps { "TCPS" } else { "TCP" }
        );

        let conn = Connection::connect(&config.username, &config.password, &target.connect_string)
            .map_err(|e| {
                ExportError::Connection(format!(
                    "Failed to connect to {}: {}",
                    target.connect_string,
                    describe(&e)
                ))
            })?;

        info!("Connected to {}", target.connect_string);

        Ok(Box::new(OracleSession {
            conn,
            connect_string: target.connect_string,
        }))
    }
}

/// One open Oracle connection. Closed when dropped.
pub struct OracleSession {
    conn: Connection,
    connect_string: String,
}

impl TableSession for OracleSession {
    fn select_all(&self, table_name: &str) -> Result<TableSnapshot<'_>> {
        let sql = select_all_sql(table_name)?;
        debug!("Executing query: {}", sql);

        let rows = self
            .conn
            .query(&sql, &[])
            .map_err(|e| ExportError::query(table_name, describe(&e)))?;

        let col_infos = rows.column_info();
        let col_types: Vec<OracleType> =
            col_infos.iter().map(|c| c.oracle_type().clone()).collect();
        let columns: Vec<ColumnDescriptor> = col_infos
            .iter()
            .map(|c| ColumnDescriptor::new(c.name(), is_fixed_width(c.oracle_type())))
            .collect();

        info!("{} has {} columns", table_name, columns.len());

        let table = table_name.to_string();
        let stream = rows.map(move |row_res| {
            let row = row_res.map_err(|e| ExportError::query(&table, describe(&e)))?;
            col_types
                .iter()
                .enumerate()
                .map(|(i, otype)| {
                    format_value(&row, i, otype)
                        .map_err(|e| ExportError::query(&table, describe(&e)))
                })
                .collect::<Result<Row>>()
        });

        Ok(TableSnapshot::new(columns, stream))
    }
}

impl Drop for OracleSession {
    fn drop(&mut self) {
        match self.conn.close() {
            Ok(()) => debug!("Closed session to {}", self.connect_string),
            Err(e) => warn!("Closing session to {} failed: {}", self.connect_string, e),
        }
    }
}

/// `CHAR` and `NCHAR` come back blank-padded to their declared width.
pub fn is_fixed_width(otype: &OracleType) -> bool {
    matches!(otype, OracleType::Char(_) | OracleType::NChar(_))
}

fn format_value(row: &oracle::Row, i: usize, otype: &OracleType) -> oracle::Result<Option<String>> {
    match otype {
        OracleType::Number(_, _)
        | OracleType::Int64
        | OracleType::Float(_)
        | OracleType::BinaryFloat
        | OracleType::BinaryDouble => row.get(i),
        OracleType::Date => {
            let v: Option<Timestamp> = row.get(i)?;
            Ok(v.map(|ts| format_date(&ts)))
        }
        OracleType::Timestamp(_) | OracleType::TimestampTZ(_) | OracleType::TimestampLTZ(_) => {
            let v: Option<Timestamp> = row.get(i)?;
            Ok(v.map(|ts| format_timestamp(&ts)))
        }
        OracleType::Raw(_) | OracleType::LongRaw | OracleType::BLOB => {
            let v: Option<Vec<u8>> = row.get(i)?;
            Ok(v.map(|b| general_purpose::STANDARD.encode(b)))
        }
        _ => row.get(i),
    }
}

pub fn format_date(ts: &Timestamp) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        ts.year(),
        ts.month(),
        ts.day(),
        ts.hour(),
        ts.minute(),
        ts.second()
    )
}

pub fn format_timestamp(ts: &Timestamp) -> String {
    format!("{}.{:06}", format_date(ts), ts.nanosecond() / 1000)
}
