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

//! Human-friendly rendering of `oracle::Error`.
//!
//! Well-known ORA codes get a one-line hint appended so that the failure
//! message reported to the automation engine is actionable on its own.

/// Hint for a well-known ORA error code.
pub fn hint_for(code: i32) -> Option<&'static str> {
    match code {
        1017 => Some("Check your username and password."),
        12154 => Some("Verify the connect string or tnsnames alias."),
        12170 => Some("Connection timed out. Check network and firewall."),
        12514 => Some("The listener does not know the requested service name."),
        12541 => Some("No listener at the specified host:port. Verify the address."),
        12545 => Some("Target host or object does not exist."),
        28759 => Some("The wallet could not be opened. Check wallet_location."),
        29024 => Some("Server certificate validation failed. Check the wallet's trusted certificates."),
        942 => Some("Table or view does not exist, or you lack permissions."),
        1031 => Some("Insufficient privileges. Contact your DBA."),
        _ => None,
    }
}

/// True when the client library itself could not be loaded (DPI-1047).
pub fn is_client_library_error(message: &str) -> bool {
    message.contains("DPI-1047") || message.contains("Cannot locate")
}

/// Appends the hint (if any) to an error message.
pub fn with_hint(message: String, code: Option<i32>) -> String {
    match code.and_then(hint_for) {
        Some(hint) => format!("{} ({})", message, hint),
        None => message,
    }
}

/// ORA code of a database-side error; `None` for client-side failures.
pub fn ora_code(err: &oracle::Error) -> Option<i32> {
    err.db_error().map(|e| e.code())
}

/// Renders an Oracle error with its hint.
pub fn describe(err: &oracle::Error) -> String {
    with_hint(err.to_string(), ora_code(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert!(hint_for(942).unwrap().contains("does not exist"));
        assert!(hint_for(1017).unwrap().contains("password"));
        assert!(hint_for(28759).unwrap().contains("wallet"));
        assert_eq!(hint_for(1), None);
    }

    #[test]
    fn test_with_hint() {
        assert_eq!(
            with_hint("ORA-01031: insufficient privileges".into(), Some(1031)),
            "ORA-01031: insufficient privileges (Insufficient privileges. Contact your DBA.)"
        );
        assert_eq!(with_hint("boom".into(), None), "boom");
        assert_eq!(with_hint("boom".into(), Some(4031)), "boom");
    }

    #[test]
    fn test_client_side_error_has_no_code() {
        let err: oracle::Error = "not a timestamp"
            .parse::<oracle::sql_type::Timestamp>()
            .unwrap_err()
            .into();
        assert_eq!(ora_code(&err), None);
        assert_eq!(describe(&err), err.to_string());
    }

    #[test]
    fn test_client_library_detection() {
        assert!(is_client_library_error(
            "DPI-1047: Cannot locate a 64-bit Oracle Client library"
        ));
        assert!(!is_client_library_error("ORA-01017: invalid username/password"));
    }
}
