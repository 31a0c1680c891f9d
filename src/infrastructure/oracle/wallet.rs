//! Oracle Wallet checks.
//!
//! A TCPS session is never attempted with missing wallet material: the
//! directory must exist, be readable and hold an auto-login (`cwallet.sso`)
//! or PKCS#12 (`ewallet.p12`) wallet. The files themselves are opaque here;
//! the client library reads them.

use crate::domain::errors::{ExportError, Result};
use log::debug;
use std::path::Path;

/// File names that make a directory a usable wallet.
pub const WALLET_FILES: [&str; 2] = ["cwallet.sso", "ewallet.p12"];

/// Verifies `dir` looks like a wallet. Failures are connection errors.
pub fn verify_wallet_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(ExportError::Connection(format!(
            "wallet directory {} does not exist",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(ExportError::Connection(format!(
            "wallet location {} is not a directory",
            dir.display()
        )));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| {
        ExportError::Connection(format!(
            "wallet directory {} is not readable: {}",
            dir.display(),
            e
        ))
    })?;

    let found: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| WALLET_FILES.contains(&name.as_str()))
        .collect();

    if found.is_empty() {
        return Err(ExportError::Connection(format!(
            "wallet directory {} contains no wallet ({})",
            dir.display(),
            WALLET_FILES.join(" or ")
        )));
    }

    debug!("Wallet {} provides {:?}", dir.display(), found);
    Ok(())
}
