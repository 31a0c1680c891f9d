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

//! Connect-string construction.
//!
//! Plain sessions use EZConnect (`host:port/service`). TCPS sessions use a
//! full descriptor that points the client at the wallet directory.

use crate::domain::entities::ConnectionConfig;
use std::path::PathBuf;

/// Where and how the client library should connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectTarget {
    pub connect_string: String,
    /// Directory with the Oracle client libraries, when one must be loaded explicitly.
    pub lib_dir: Option<PathBuf>,
    /// Client configuration directory (`sqlnet.ora`, `tnsnames.ora`); the wallet for TCPS.
    pub config_dir: Option<PathBuf>,
    pub use_tcps: bool,
}

impl ConnectTarget {
    pub fn needs_client_init(&self) -> bool {
        self.lib_dir.is_some() || self.config_dir.is_some()
    }
}

/// Builds the connect target. Expects a config that already passed `validate()`.
pub fn build_connect_target(config: &ConnectionConfig) -> ConnectTarget {
    let lib_dir = config.client_lib_path().map(PathBuf::from);

    if !config.use_tcps {
        let connect_string = match config.dsn_override() {
            Some(dsn) => dsn.to_string(),
            None => ez_connect(config),
        };
        return ConnectTarget {
            connect_string,
            lib_dir,
            config_dir: None,
            use_tcps: false,
        };
    }

    let wallet = config.wallet_dir().map(PathBuf::from);
    let connect_string = match (config.dsn_override(), wallet.as_ref()) {
        (Some(dsn), _) => dsn.to_string(),
        (None, Some(w)) => tcps_descriptor(config, &w.display().to_string()),
        (None, None) => tcps_descriptor(config, ""),
    };

    ConnectTarget {
        connect_string,
        lib_dir,
        config_dir: wallet,
        use_tcps: true,
    }
}

/// Format: `host:port/service_name`
pub fn ez_connect(config: &ConnectionConfig) -> String {
    format!("{}:{}/{}", config.host, config.port, config.service_name)
}

fn tcps_descriptor(config: &ConnectionConfig, wallet_dir: &str) -> String {
    format!(
        "(DESCRIPTION=(ADDRESS=(PROTOCOL=TCPS)(HOST={})(PORT={}))(CONNECT_DATA=(SERVICE_NAME={}))(SECURITY=(MY_WALLET_DIRECTORY={})))",
        config.host, config.port, config.service_name, wallet_dir
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_target() {
        let config = ConnectionConfig::new("scott", "tiger", "dbhost", "ORCL");
        let target = build_connect_target(&config);
        assert_eq!(target.connect_string, "dbhost:1521/ORCL");
        assert!(!target.use_tcps);
        assert!(!target.needs_client_init());
    }

    #[test]
    fn test_plain_target_ignores_wallet() {
        let mut config = ConnectionConfig::new("scott", "tiger", "dbhost", "ORCL");
        config.port = 1600;
        config.wallet_location = Some(PathBuf::from("/no/such/wallet"));
        let target = build_connect_target(&config);
        assert_eq!(target.connect_string, "dbhost:1600/ORCL");
        assert_eq!(target.config_dir, None);
    }

    #[test]
    fn test_plain_target_uses_client_lib_when_given() {
        let mut config = ConnectionConfig::new("scott", "tiger", "dbhost", "ORCL");
        config.client_lib_dir = Some(PathBuf::from("/opt/oracle/instantclient_21"));
        let target = build_connect_target(&config);
        assert_eq!(
            target.lib_dir,
            Some(PathBuf::from("/opt/oracle/instantclient_21"))
        );
        assert!(target.needs_client_init());
    }

    #[test]
    fn test_tcps_descriptor() {
        let mut config = ConnectionConfig::new("scott", "tiger", "adb.example.com", "svc_high");
        config.use_tcps = true;
        config.port = 2484;
        config.wallet_location = Some(PathBuf::from("/opt/wallet"));
        config.client_lib_dir = Some(PathBuf::from("/opt/oracle/ic"));

        let target = build_connect_target(&config);
        assert_eq!(
            target.connect_string,
            "(DESCRIPTION=(ADDRESS=(PROTOCOL=TCPS)(HOST=adb.example.com)(PORT=2484))\
             (CONNECT_DATA=(SERVICE_NAME=svc_high))(SECURITY=(MY_WALLET_DIRECTORY=/opt/wallet)))"
        );
        assert_eq!(target.config_dir, Some(PathBuf::from("/opt/wallet")));
        assert_eq!(target.lib_dir, Some(PathBuf::from("/opt/oracle/ic")));
        assert!(target.use_tcps);
    }

    #[test]
    fn test_dsn_override() {
        let mut config = ConnectionConfig::new("scott", "tiger", "", "");
        config.dsn = Some(" prod_high ".into());
        assert_eq!(build_connect_target(&config).connect_string, "prod_high");

        config.use_tcps = true;
        config.wallet_location = Some(PathBuf::from("/opt/wallet"));
        let target = build_connect_target(&config);
        assert_eq!(target.connect_string, "prod_high");
        assert_eq!(target.config_dir, Some(PathBuf::from("/opt/wallet")));
    }
}
