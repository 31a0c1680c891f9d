//! Module entry logic: argument record in, result record out.
//!
//! Mirrors what an Ansible module reports: `changed` is true only when a
//! file was written, `failed` is set on any error, and `msg` carries the
//! human-readable status line.

use crate::application::exporter::Exporter;
use crate::config::ModuleArgs;
use crate::domain::entities::ExportResult;
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModuleOutcome {
    pub changed: bool,
    pub failed: bool,
    pub msg: String,
    /// Same text as `msg`; kept for playbooks that register `message`.
    pub message: String,
    #[serde(flatten)]
    pub result: Option<ExportResult>,
}

impl ModuleOutcome {
    fn failed(msg: String) -> Self {
        Self {
            changed: false,
            failed: true,
            message: msg.clone(),
            msg,
            result: None,
        }
    }

    fn unchanged(msg: String) -> Self {
        Self {
            changed: false,
            failed: false,
            message: msg.clone(),
            msg,
            result: None,
        }
    }

    fn from_result(table_name: &str, result: ExportResult) -> Self {
        let msg = result.summary(table_name);
        Self {
            changed: result.success,
            failed: !result.success,
            message: msg.clone(),
            msg,
            result: Some(result),
        }
    }
}

pub struct ModuleRunner {
    exporter: Exporter,
}

impl ModuleRunner {
    pub fn new(exporter: Exporter) -> Self {
        Self { exporter }
    }

    pub fn run(&self, args: ModuleArgs) -> ModuleOutcome {
        let check_mode = args.check_mode;

        let (config, request) = match args.into_parts() {
            Ok(parts) => parts,
            Err(e) => return ModuleOutcome::failed(e.to_string()),
        };

        if check_mode {
            if let Err(e) = config.validate().and_then(|_| request.validate()) {
                return ModuleOutcome::failed(e.to_string());
            }
            info!("Check mode: skipping export of {}", request.table_name);
            return ModuleOutcome::unchanged(format!(
                "Check mode: table {} would be exported to {}",
                request.table_name,
                request.save_path.display()
            ));
        }

        let result = self.exporter.export(&config, &request);
        ModuleOutcome::from_result(&request.table_name, result)
    }
}
