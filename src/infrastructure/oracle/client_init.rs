//! Oracle client library initialisation.
//!
//! ODPI-C is initialised once per process. When the caller supplies a
//! library directory (and, for TCPS, a wallet acting as the configuration
//! directory) they are applied here, before the first connection.

use crate::domain::errors::{ExportError, Result};
use crate::infrastructure::oracle::descriptor::ConnectTarget;
use crate::infrastructure::oracle::error_hints::{describe, is_client_library_error};
use log::{info, warn};
use oracle::InitParams;

pub fn init_client(target: &ConnectTarget) -> Result<()> {
    if !target.needs_client_init() {
        return Ok(());
    }

    let mut params = InitParams::new();

    if let Some(lib_dir) = &target.lib_dir {
        if !lib_dir.is_dir() {
            return Err(ExportError::Connection(format!(
                "Oracle client library directory not found at: {}",
                lib_dir.display()
            )));
        }
        params
            .oracle_client_lib_dir(lib_dir)
            .map_err(|e| ExportError::Connection(describe(&e)))?;
    }
    if let Some(config_dir) = &target.config_dir {
        params
            .oracle_client_config_dir(config_dir)
            .map_err(|e| ExportError::Connection(describe(&e)))?;
    }

    match params.init() {
        Ok(true) => {
            info!(
                "Oracle client initialised (lib_dir: {:?}, config_dir: {:?})",
                target.lib_dir, target.config_dir
            );
            Ok(())
        }
        Ok(false) => {
            warn!("Oracle client was already initialised; library and config directories were not re-applied");
            Ok(())
        }
        Err(e) => {
            let msg = e.to_string();
            if is_client_library_error(&msg) {
                return Err(ExportError::Connection(format!(
                    "Oracle client library could not be loaded from {:?}: {}",
                    target.lib_dir, msg
                )));
            }
            Err(ExportError::Connection(describe(&e)))
        }
    }
}
