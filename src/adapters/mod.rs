//! Concrete adapter implementations for ports.

pub mod cache;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod format;
#[cfg(feature = "web")]
pub mod web;
