//! # Oracle Table Exporter
//!
//! Connects to an Oracle database over TCP or wallet-backed TCPS and exports
//! one table to a flat CSV file (header line, comma-joined fields, no
//! quoting, CHAR padding stripped).
//!
//! It runs as an Ansible binary module (`oracle_table_exporter <args-file>`)
//! or as a plain CLI (`--config export.yaml` plus overrides). Either way the
//! outcome is printed to stdout as one JSON object; logs go to stderr.
//!
//! The code follows a ports-and-adapters layout: `domain` holds the data
//! and rules, `ports` the traits, `infrastructure` the Oracle and file
//! adapters, and `application` the export flow.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;

use crate::application::exporter::Exporter;
use crate::application::module_runner::{ModuleOutcome, ModuleRunner};
use crate::config::{AppConfig, CliArgs, ModuleArgs};
use crate::domain::errors::Result;
use crate::infrastructure::local_storage::csv_file_adapter::CsvFileAdapter;
use crate::infrastructure::oracle::oracle_session_adapter::OracleSessionAdapter;
use clap::Parser;
use log::{error, info};
use std::process;
use std::sync::Arc;

fn main() {
    // 1. Initialize Logging (stderr, so stdout stays pure JSON)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Parse Arguments
    let args = CliArgs::parse();

    // 3. Load the argument record
    let module_args = match load_module_args(&args) {
        Ok(a) => a,
        Err(e) => {
            error!("Invalid arguments: {}", e);
            let msg = e.to_string();
            emit(&serde_json::json!({
                "changed": false,
                "failed": true,
                "msg": msg,
                "message": msg,
            }));
            process::exit(1);
        }
    };

    // 4. Wire adapters
    let exporter = Exporter::new(
        Arc::new(OracleSessionAdapter::new()),
        Arc::new(CsvFileAdapter::default()),
    );
    let runner = ModuleRunner::new(exporter);

    // 5. Run
    let outcome = runner.run(module_args);
    report(&outcome);

    if outcome.failed {
        process::exit(1);
    }
}

fn load_module_args(args: &CliArgs) -> Result<ModuleArgs> {
    if let Some(args_file) = &args.args_file {
        info!("Reading module arguments from {}", args_file.display());
        return ModuleArgs::from_json_file(args_file);
    }

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default_from_cli(args),
    };

    // Merge CLI overrides
    config.merge_cli(args);
    Ok(config.into_module_args())
}

fn report(outcome: &ModuleOutcome) {
    match serde_json::to_value(outcome) {
        Ok(v) => emit(&v),
        Err(e) => {
            error!("Failed to serialize result: {}", e);
            emit(&serde_json::json!({
                "changed": outcome.changed,
                "failed": outcome.failed,
                "msg": outcome.msg,
            }));
        }
    }
}

fn emit(value: &serde_json::Value) {
    println!("{}", value);
}
