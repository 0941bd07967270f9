//! Calculation core: pure, synchronous functions over holdings.

pub mod calendar;
pub mod config_validation;
pub mod display;
pub mod engine;
pub mod error;
pub mod flight_log;
pub mod gauges;
pub mod holding;
pub mod income_projection;
pub mod portfolio;
pub mod projection;
pub mod query;
pub mod settings;
pub mod tier;
pub mod timeline;
