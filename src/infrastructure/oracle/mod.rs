pub mod client_init;
pub mod descriptor;
pub mod error_hints;
pub mod oracle_session_adapter;
pub mod sql_utils;
pub mod wallet;
