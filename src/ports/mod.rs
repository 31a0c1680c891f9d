pub mod session_port;
pub mod sink_port;
