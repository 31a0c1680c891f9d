//! Syntax checks for table identifiers.
//!
//! The table name is spliced into `SELECT * FROM <name>` unquoted, so only
//! plain Oracle identifiers are accepted: an optional schema prefix and a
//! table name, each starting with a letter and made of letters, digits,
//! `_`, `$` and `#`.

use crate::domain::errors::{ExportError, Result};

/// Longest identifier Oracle accepts (12.2 and later), in bytes.
pub const MAX_IDENTIFIER_BYTES: usize = 128;

/// Validates `TABLE` or `SCHEMA.TABLE`.
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ExportError::Configuration(
            "table_name cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() > 2 {
        return Err(invalid(name, "at most one '.' (schema.table) is allowed"));
    }

    for part in parts {
        validate_part(name, part)?;
    }
    Ok(())
}

fn validate_part(full: &str, part: &str) -> Result<()> {
    let mut chars = part.chars();
    match chars.next() {
        None => return Err(invalid(full, "empty identifier part")),
        Some(c) if !c.is_ascii_alphabetic() => {
            return Err(invalid(full, "identifiers must start with a letter"))
        }
        _ => {}
    }
    if let Some(bad) = chars.find(|c| !is_identifier_char(*c)) {
        return Err(invalid(full, &format!("character '{}' is not allowed", bad)));
    }
    if part.len() > MAX_IDENTIFIER_BYTES {
        return Err(invalid(
            full,
            &format!("identifiers are limited to {} bytes", MAX_IDENTIFIER_BYTES),
        ));
    }
    Ok(())
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '#')
}

fn invalid(name: &str, reason: &str) -> ExportError {
    ExportError::Configuration(format!("invalid table_name '{}': {}", name, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_and_qualified_names() {
        for ok in ["SQA", "employees", "HR.EMPLOYEES", "T_1", "A$B#C", "x"] {
            assert!(validate_table_name(ok).is_ok(), "{} should be valid", ok);
        }
    }

    #[test]
    fn test_rejects_injection_and_quoting() {
        for bad in [
            "",
            "EMP; DROP TABLE X",
            "\"Mixed Case\"",
            "1TABLE",
            "_T",
            "A.B.C",
            "HR.",
            ".EMP",
            "EMP WHERE 1=1",
            "EMP--",
            "TÄBLE",
        ] {
            let err = validate_table_name(bad).unwrap_err();
            assert_eq!(err.category(), "configuration", "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_length_limit() {
        let longest = format!("T{}", "X".repeat(MAX_IDENTIFIER_BYTES - 1));
        assert!(validate_table_name(&longest).is_ok());
        let too_long = format!("{}X", longest);
        assert!(validate_table_name(&too_long).is_err());
    }
}
