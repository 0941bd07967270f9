//! Port traits at the I/O seams of the crate.

pub mod config_port;
pub mod holdings_port;
