//! flight-report - delay reports over a flight-records database.
//!
//! This library exposes the core modules for use in integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod db;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod query;
pub mod report;
