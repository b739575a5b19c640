//! Process-level concerns shared by every crate: command line and environment
//! configuration, and console logging.

pub mod config;
pub mod logging;
