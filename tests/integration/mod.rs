//! Integration tests for flight-report.

pub mod catalog_test;
pub mod fail_soft_test;
pub mod report_test;
