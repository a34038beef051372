//! Report query catalog for flight-report.
//!
//! The catalog is closed: every query the tool can run is a `CatalogQuery`
//! variant, bound through named parameters.

pub mod catalog;
pub mod params;

pub use catalog::{CatalogQuery, QuerySpec, FLIGHT_COLUMNS};
pub use params::{search_pattern, QueryParams};
