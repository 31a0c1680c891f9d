pub mod exporter;
pub mod module_runner;
