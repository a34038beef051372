//! Turning catalog results into display lines and chart data.

pub mod chart;
pub mod presenter;
pub mod records;
pub mod shaper;

pub use presenter::{format_flight, render, Rendering};
pub use records::{CategoryPercentage, FlightRecord, RoutePercentage};
pub use shaper::{to_matrix, to_series, AggregateSeries, DelayMatrix};
