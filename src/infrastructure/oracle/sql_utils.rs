//! SQL text for the export query.

use crate::domain::errors::Result;
use crate::domain::identifier::validate_table_name;

/// `SELECT * FROM <table_name>`; the name is re-validated because it is spliced in unquoted.
pub fn select_all_sql(table_name: &str) -> Result<String> {
    validate_table_name(table_name)?;
    Ok(format!("SELECT * FROM {}", table_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_sql() {
        assert_eq!(select_all_sql("SQA").unwrap(), "SELECT * FROM SQA");
        assert_eq!(
            select_all_sql("HR.EMPLOYEES").unwrap(),
            "SELECT * FROM HR.EMPLOYEES"
        );
        assert!(select_all_sql("SQA WHERE 1=1").is_err());
    }
}
