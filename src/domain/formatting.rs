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

//! # Field Rendering
//!
//! Turns fetched values into the exact text that lands in the output file.
//! Fields are written raw: no quoting and no escaping, so values that contain
//! the delimiter or a newline will not survive a round trip. That is accepted
//! for the tables this tool is pointed at.

use crate::domain::entities::{ColumnDescriptor, Row};

/// Field delimiter of the output file.
pub const FIELD_DELIMITER: u8 = b',';

/// Strips the right-padding Oracle adds to `CHAR`/`NCHAR` values.
///
/// Only trailing blanks go; leading blanks and other whitespace are data.
pub fn trim_char_padding(value: &str) -> &str {
    value.trim_end_matches(' ')
}

/// Renders one field. NULL becomes an empty field.
pub fn render_field<'v>(column: &ColumnDescriptor, value: Option<&'v str>) -> &'v str {
    match value {
        None => "",
        Some(v) if column.fixed_width => trim_char_padding(v),
        Some(v) => v,
    }
}

/// Renders a full row in column order.
pub fn render_row<'r>(columns: &[ColumnDescriptor], row: &'r Row) -> Vec<&'r str> {
    columns
        .iter()
        .zip(row.iter())
        .map(|(col, val)| render_field(col, val.as_deref()))
        .collect()
}
