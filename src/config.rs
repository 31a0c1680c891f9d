//! Configuration sources.
//!
//! Arguments arrive either as an Ansible argument file (a flat JSON object,
//! passed as the only positional argument) or as a YAML/JSON configuration
//! file with CLI overrides. Both are folded into a `ModuleArgs` record and
//! then split into the domain's `ConnectionConfig` and `ExportRequest`.

use crate::domain::entities::{ConnectionConfig, ExportAction, ExportRequest, DEFAULT_PORT};
use crate::domain::errors::{ExportError, Result};
use clap::Parser;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Environment variable consulted when no password is configured.
pub const PASSWORD_ENV: &str = "ORACLE_PASSWORD";

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub export: ExportConfig,
}

#[derive(Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub username: String,
    pub password: Option<String>,
    #[serde(default)]
    pub host: String,
    pub port: Option<u16>,
    #[serde(default, alias = "service")]
    pub service_name: String,
    #[serde(default)]
    pub use_tcps: bool,
    pub wallet_location: Option<PathBuf>,
    pub client_lib_dir: Option<PathBuf>,
    #[serde(alias = "connection_string")]
    pub dsn: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExportConfig {
    #[serde(alias = "table")]
    pub table_name: Option<String>,
    pub save_path: Option<PathBuf>,
    pub action: Option<String>,
}

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Ansible argument file (JSON). When given, all other options are ignored.
    pub args_file: Option<PathBuf>,

    /// Path to configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<String>,

    // Overrides for ad-hoc runs
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<u16>,
    #[arg(long)]
    pub service_name: Option<String>,
    /// Connect over TLS using an Oracle Wallet
    #[arg(long)]
    pub use_tcps: bool,
    #[arg(long)]
    pub wallet_location: Option<PathBuf>,
    #[arg(long)]
    pub client_lib_dir: Option<PathBuf>,
    /// Raw connect string or tnsnames alias
    #[arg(long)]
    pub dsn: Option<String>,
    #[arg(long)]
    pub table_name: Option<String>,
    #[arg(short, long)]
    pub save_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            ExportError::Configuration(format!("cannot open config file {}: {}", path, e))
        })?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: AppConfig = if path.ends_with(".json") {
            serde_json::from_str(&contents).map_err(|e| {
                ExportError::Configuration(format!("invalid config file {}: {}", path, e))
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| {
                ExportError::Configuration(format!("invalid config file {}: {}", path, e))
            })?
        };

        Ok(config)
    }

    /// Starting point when no config file is given.
    pub fn default_from_cli(args: &CliArgs) -> Self {
        let mut config = Self {
            database: DatabaseConfig::default(),
            export: ExportConfig::default(),
        };
        config.merge_cli(args);
        config
    }

    pub fn merge_cli(&mut self, args: &CliArgs) {
        if let Some(u) = &args.username { self.database.username = u.clone(); }
        if let Some(p) = &args.password { self.database.password = Some(p.clone()); }
        if let Some(h) = &args.host { self.database.host = h.clone(); }
        if let Some(p) = args.port { self.database.port = Some(p); }
        if let Some(s) = &args.service_name { self.database.service_name = s.clone(); }
        if args.use_tcps { self.database.use_tcps = true; }
        if let Some(w) = &args.wallet_location { self.database.wallet_location = Some(w.clone()); }
        if let Some(l) = &args.client_lib_dir { self.database.client_lib_dir = Some(l.clone()); }
        if let Some(d) = &args.dsn { self.database.dsn = Some(d.clone()); }
        if let Some(t) = &args.table_name { self.export.table_name = Some(t.clone()); }
        if let Some(s) = &args.save_path { self.export.save_path = Some(s.clone()); }
    }

    /// Flattens into the module argument record, resolving the password
    /// from `ORACLE_PASSWORD` when the config does not carry one.
    pub fn into_module_args(self) -> ModuleArgs {
        let password = self
            .database
            .password
            .or_else(|| std::env::var(PASSWORD_ENV).ok())
            .unwrap_or_default();

        ModuleArgs {
            username: self.database.username,
            password,
            host: self.database.host,
            port: self.database.port,
            service_name: self.database.service_name,
            use_tcps: self.database.use_tcps,
            wallet_location: self.database.wallet_location,
            client_lib_dir: self.database.client_lib_dir,
            dsn: self.database.dsn,
            action: self.export.action.unwrap_or_else(|| "export".to_string()),
            table_name: self.export.table_name,
            save_path: self.export.save_path,
            check_mode: false,
        }
    }
}

fn default_action() -> String {
    "export".to_string()
}

/// The flat argument record an automation engine hands to the module.
///
/// Unknown keys (Ansible adds several `_ansible_*` entries) are ignored.
#[derive(Deserialize, Clone, Default)]
pub struct ModuleArgs {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub host: String,
    #[serde(default, deserialize_with = "loose_port")]
    pub port: Option<u16>,
    #[serde(default)]
    pub service_name: String,
    #[serde(default, deserialize_with = "loose_bool")]
    pub use_tcps: bool,
    pub wallet_location: Option<PathBuf>,
    pub client_lib_dir: Option<PathBuf>,
    pub dsn: Option<String>,
    #[serde(default = "default_action")]
    pub action: String,
    pub table_name: Option<String>,
    pub save_path: Option<PathBuf>,
    #[serde(rename = "_ansible_check_mode", default, deserialize_with = "loose_bool")]
    pub check_mode: bool,
}

// Templated Ansible values arrive as strings ("1522", "False").
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue<T> {
    Typed(T),
    Number(i64),
    Text(String),
}

fn loose_port<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseValue<u16>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LooseValue::Typed(port)) => Ok(Some(port)),
        Some(LooseValue::Number(n)) => u16::try_from(n)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid port '{}'", n))),
        Some(LooseValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid port '{}'", text)))
        }
    }
}

fn loose_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseValue<bool>>::deserialize(deserializer)? {
        None => Ok(false),
        Some(LooseValue::Typed(flag)) => Ok(flag),
        Some(LooseValue::Number(0)) => Ok(false),
        Some(LooseValue::Number(1)) => Ok(true),
        Some(LooseValue::Number(n)) => Err(de::Error::custom(format!("invalid boolean '{}'", n))),
        Some(LooseValue::Text(text)) => parse_bool(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid boolean '{}'", text))),
    }
}

/// Boolean spellings Ansible accepts for module arguments.
fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" | "t" => Some(true),
        "false" | "no" | "n" | "off" | "0" | "f" | "" => Some(false),
        _ => None,
    }
}

impl ModuleArgs {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ExportError::Configuration(format!("invalid module arguments: {}", e)))
    }

    pub fn from_json_file(path: &std::path::Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ExportError::Configuration(format!(
                "cannot read module arguments {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&contents)
    }

    /// Splits the record into the domain inputs of one export.
    pub fn into_parts(self) -> Result<(ConnectionConfig, ExportRequest)> {
        let action = ExportAction::parse(&self.action)?;

        let (table_name, save_path) = match (self.table_name, self.save_path) {
            (Some(t), Some(p)) if !t.trim().is_empty() && !p.as_os_str().is_empty() => {
                (t.trim().to_string(), p)
            }
            _ => {
                return Err(ExportError::Configuration(
                    "Both 'table_name' and 'save_path' are required for export action"
                        .to_string(),
                ))
            }
        };

        let config = ConnectionConfig {
            username: self.username,
            password: self.password,
            host: self.host,
            port: self.port.unwrap_or(DEFAULT_PORT),
            service_name: self.service_name,
            use_tcps: self.use_tcps,
            wallet_location: self.wallet_location,
            client_lib_dir: self.client_lib_dir,
            dsn: self.dsn,
        };
        let request = ExportRequest {
            table_name,
            save_path,
            action,
        };
        Ok((config, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_yaml_config() {
        let yaml = r#"
database:
  username: "test_user"
  password: "test_password"
  host: "localhost"
  port: 1522
  service: "ORCL"
  use_tcps: true
  wallet_location: "/opt/wallet"
  client_lib_dir: "/opt/oracle/instantclient"
export:
  table: "MY_TABLE"
  save_path: "/tmp/my_table.csv"
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", yaml).unwrap();
        let path = file.path().to_str().unwrap();

        let config = AppConfig::from_file(path).expect("Failed to parse config");

        assert_eq!(config.database.username, "test_user");
        assert_eq!(config.database.port, Some(1522));
        assert_eq!(config.database.service_name, "ORCL");
        assert!(config.database.use_tcps);
        assert_eq!(config.export.table_name.as_deref(), Some("MY_TABLE"));

        let (conn, req) = config.into_module_args().into_parts().unwrap();
        assert_eq!(conn.port, 1522);
        assert_eq!(conn.wallet_dir(), Some(std::path::Path::new("/opt/wallet")));
        assert_eq!(req.action, ExportAction::Export);
        assert_eq!(req.save_path, PathBuf::from("/tmp/my_table.csv"));
    }

    #[test]
    fn test_load_json_config_defaults_port() {
        let json = r#"{
            "database": {"username": "u", "password": "p", "host": "h", "service_name": "s"},
            "export": {"table_name": "T", "save_path": "out.csv"}
        }"#;
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{}", json).unwrap();

        let config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();
        let (conn, _) = config.into_module_args().into_parts().unwrap();
        assert_eq!(conn.port, 1521);
        assert!(!conn.use_tcps);
    }

    #[test]
    fn test_missing_config_file() {
        let err = AppConfig::from_file("/no/such/config.yaml").err().unwrap();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn test_cli_overrides() {
        let yaml = r#"
database:
  username: "file_user"
  password: "file_pw"
  host: "filehost"
  service_name: "FILESVC"
export:
  table_name: "FILE_TABLE"
  save_path: "/tmp/file.csv"
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", yaml).unwrap();
        let mut config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();

        let args = CliArgs::parse_from([
            "oracle_table_exporter",
            "--host",
            "clihost",
            "--port",
            "2484",
            "--use-tcps",
            "--table-name",
            "CLI_TABLE",
        ]);
        config.merge_cli(&args);

        assert_eq!(config.database.username, "file_user");
        assert_eq!(config.database.host, "clihost");
        assert_eq!(config.database.port, Some(2484));
        assert!(config.database.use_tcps);
        assert_eq!(config.export.table_name.as_deref(), Some("CLI_TABLE"));
        assert_eq!(config.export.save_path, Some(PathBuf::from("/tmp/file.csv")));
    }

    #[test]
    fn test_cli_positional_args_file() {
        let args = CliArgs::parse_from(["oracle_table_exporter", "/tmp/ansible_args"]);
        assert_eq!(args.args_file, Some(PathBuf::from("/tmp/ansible_args")));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_module_args_from_ansible_json() {
        let json = r#"{
            "username": "scott",
            "password": "tiger",
            "host": "db.example.com",
            "service_name": "ORCLPDB1",
            "table_name": "SQA",
            "save_path": "/tmp/exported_db.csv",
            "action": "export",
            "_ansible_check_mode": true,
            "_ansible_module_name": "oracle_table_exporter",
            "_ansible_verbosity": 0
        }"#;
        let args = ModuleArgs::from_json_str(json).unwrap();
        assert!(args.check_mode);

        let (conn, req) = args.into_parts().unwrap();
        assert_eq!(conn.port, 1521);
        assert_eq!(conn.host, "db.example.com");
        assert_eq!(req.table_name, "SQA");
    }

    #[test]
    fn test_module_args_accept_templated_strings() {
        let json = r#"{
            "username": "scott",
            "password": "tiger",
            "host": "db.example.com",
            "port": "1522",
            "service_name": "ORCLPDB1",
            "use_tcps": "False",
            "table_name": "SQA",
            "save_path": "/tmp/exported_db.csv",
            "_ansible_check_mode": "yes"
        }"#;
        let args = ModuleArgs::from_json_str(json).unwrap();
        assert_eq!(args.port, Some(1522));
        assert!(!args.use_tcps);
        assert!(args.check_mode);

        let args = ModuleArgs::from_json_str(r#"{"port": 2484, "use_tcps": "True"}"#).unwrap();
        assert_eq!(args.port, Some(2484));
        assert!(args.use_tcps);

        let args = ModuleArgs::from_json_str(r#"{"port": "", "use_tcps": 1}"#).unwrap();
        assert_eq!(args.port, None);
        assert!(args.use_tcps);

        let args = ModuleArgs::from_json_str(r#"{"port": null, "use_tcps": "no"}"#).unwrap();
        assert_eq!(args.port, None);
        assert!(!args.use_tcps);
    }

    #[test]
    fn test_module_args_reject_garbled_values() {
        let err = ModuleArgs::from_json_str(r#"{"port": "15x2"}"#).err().unwrap();
        assert_eq!(err.category(), "configuration");
        assert!(err.to_string().contains("invalid port '15x2'"));

        let err = ModuleArgs::from_json_str(r#"{"use_tcps": "maybe"}"#).err().unwrap();
        assert!(err.to_string().contains("invalid boolean 'maybe'"));

        let err = ModuleArgs::from_json_str(r#"{"port": 70000}"#).err().unwrap();
        assert!(err.to_string().contains("invalid port '70000'"));
    }

    #[test]
    fn test_module_args_require_table_and_path() {
        let args = ModuleArgs::from_json_str(
            r#"{"username": "u", "password": "p", "host": "h", "service_name": "s", "table_name": "T"}"#,
        )
        .unwrap();
        let err = args.into_parts().err().unwrap();
        assert_eq!(
            err.to_string(),
            "Configuration error: Both 'table_name' and 'save_path' are required for export action"
        );
    }

    #[test]
    fn test_module_args_reject_unknown_action() {
        let args = ModuleArgs::from_json_str(
            r#"{"action": "truncate", "table_name": "T", "save_path": "/tmp/t.csv"}"#,
        )
        .unwrap();
        let err = args.into_parts().err().unwrap();
        assert!(err.to_string().contains("unsupported action 'truncate'"));
    }

    #[test]
    fn test_module_args_invalid_json() {
        let err = ModuleArgs::from_json_str("not json").err().unwrap();
        assert_eq!(err.category(), "configuration");
    }
}
